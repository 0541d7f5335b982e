// Line-oriented adapters between the race loop and the external
// renderer/input source: JSON frames out, JSON input messages in.

use crate::interface_adapters::protocol::{ClientMessage, FrameDto};
use crate::use_cases::{FrameUpdate, GameEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Reads one `ClientMessage` per line and forwards it to the race loop.
/// End of input (or a read error) is forwarded as `Quit`.
pub async fn input_reader<R>(reader: R, input_tx: mpsc::Sender<GameEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("input stream ended");
                break;
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<ClientMessage>(line) {
            Ok(message) => GameEvent::from(message),
            Err(e) => {
                warn!(error = %e, line, "ignoring malformed input message");
                continue;
            }
        };

        if input_tx.send(event).await.is_err() {
            // Race loop is gone; nothing left to feed.
            return;
        }
    }

    let _ = input_tx.send(GameEvent::Quit).await;
}

/// Serializes each frame once and writes it as a JSON line. Returns when the
/// race loop drops its sender.
pub async fn frame_writer<W>(
    mut frame_rx: broadcast::Receiver<FrameUpdate>,
    mut writer: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        match frame_rx.recv().await {
            Ok(update) => {
                let mut txt = match serde_json::to_string(&FrameDto::from(update)) {
                    Ok(txt) => txt,
                    Err(e) => {
                        error!(error = ?e, "failed to serialize frame");
                        continue;
                    }
                };
                txt.push('\n');
                writer.write_all(txt.as_bytes()).await?;
                writer.flush().await?;
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(missed = n, "frame writer lagged; skipping to latest frame");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!("frame channel closed");
                break;
            }
        }
    }

    writer.flush().await
}
