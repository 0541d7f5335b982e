// Framework bootstrap for the race runtime.

use crate::frameworks::config;
use crate::interface_adapters::assets::{AssetError, load_race_assets};
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::stdio::{frame_writer, input_reader};
use crate::use_cases::game::race_task;
use crate::use_cases::{FrameUpdate, GameEvent, RaceAssets, RaceSession, RaceSettings};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::{Notify, broadcast, mpsc};

#[derive(Debug)]
pub enum RunError {
    Assets(AssetError),
    Io(std::io::Error),
    Task(tokio::task::JoinError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Assets(e) => write!(f, "failed to load assets: {e}"),
            RunError::Io(e) => write!(f, "i/o error: {e}"),
            RunError::Task(e) => write!(f, "runtime task failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Assets(e) => Some(e),
            RunError::Io(e) => Some(e),
            RunError::Task(e) => Some(e),
        }
    }
}

impl From<AssetError> for RunError {
    fn from(e: AssetError) -> Self {
        RunError::Assets(e)
    }
}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<tokio::task::JoinError> for RunError {
    fn from(e: tokio::task::JoinError) -> Self {
        RunError::Task(e)
    }
}

pub fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Frames own stdout, so logs go to stderr.
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Runs one race session: input lines from `input`, frame lines to `output`.
/// Returns once the player quits, input ends or `shutdown` fires.
pub async fn run<R, W>(
    input: R,
    output: W,
    assets: RaceAssets,
    settings: RaceSettings,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) -> Result<(), RunError>
where
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    // input_tx/rx: every input message goes to the single race loop.
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(config::INPUT_CHANNEL_CAPACITY);
    // frame_tx/rx: one frame per tick for the renderer.
    let (frame_tx, frame_rx) = broadcast::channel::<FrameUpdate>(config::FRAME_BROADCAST_CAPACITY);

    let writer = tokio::spawn(frame_writer(frame_rx, output));
    let reader = tokio::spawn(input_reader(input, input_tx));

    let session = RaceSession::new(assets, settings, SystemClock);
    let session = race_task(session, input_rx, frame_tx, tick_interval, shutdown).await;
    tracing::info!(
        level = session.game_info().level,
        ticks = session.tick_count(),
        "race finished"
    );

    // The reader may be parked on a read that never completes.
    reader.abort();
    writer.await??;
    Ok(())
}

/// Loads configuration and assets, then races over stdin/stdout until quit.
pub async fn run_with_config() -> Result<(), RunError> {
    init_runtime();

    let assets_dir = config::assets_dir();
    // Failures are logged once by the caller, with the path in the message.
    let assets = load_race_assets(&assets_dir)?;

    let tick_rate_hz = config::tick_rate_hz();
    let tick_interval = config::tick_interval();
    let settings = RaceSettings {
        outcome_pause_ticks: config::pause_ticks(config::outcome_pause(), tick_rate_hz),
        ..RaceSettings::default()
    };
    tracing::debug!(
        assets_dir = %assets_dir.display(),
        tick_rate_hz,
        outcome_pause_ticks = settings.outcome_pause_ticks,
        "race configured"
    );

    let shutdown = Arc::new(Notify::new());
    let ctrl_c = {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.notify_one();
            }
        })
    };

    let result = run(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        assets,
        settings,
        tick_interval,
        shutdown,
    )
    .await;

    ctrl_c.abort();
    result
}
