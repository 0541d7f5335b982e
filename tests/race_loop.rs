mod support;

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::sync::{Notify, broadcast, mpsc};
use track_racer::domain::GameInfo;
use track_racer::interface_adapters::clock::SystemClock;
use track_racer::use_cases::game::race_task;
use track_racer::use_cases::{Controls, FrameUpdate, GameEvent, Phase, RaceSession, RaceSettings};

const TICK: Duration = Duration::from_millis(1);

struct Harness {
    input_tx: mpsc::Sender<GameEvent>,
    frame_rx: broadcast::Receiver<FrameUpdate>,
    shutdown: Arc<Notify>,
    task: tokio::task::JoinHandle<RaceSession<SystemClock>>,
}

fn spawn_race() -> Harness {
    let (input_tx, input_rx) = mpsc::channel(64);
    let (frame_tx, frame_rx) = broadcast::channel(1024);
    let shutdown = Arc::new(Notify::new());
    let session = RaceSession::new(support::test_assets(), RaceSettings::default(), SystemClock);

    let task = tokio::spawn(race_task(
        session,
        input_rx,
        frame_tx,
        TICK,
        Arc::clone(&shutdown),
    ));

    Harness {
        input_tx,
        frame_rx,
        shutdown,
        task,
    }
}

async fn next_frame(frame_rx: &mut broadcast::Receiver<FrameUpdate>) -> FrameUpdate {
    tokio::time::timeout(Duration::from_secs(5), frame_rx.recv())
        .await
        .expect("frame should arrive in time")
        .expect("frame channel open")
}

#[tokio::test]
async fn test_throttle_moves_player_after_key_press() {
    let mut race = spawn_race();

    let first = next_frame(&mut race.frame_rx).await;
    assert_eq!(
        first.banner.as_deref(),
        Some("Press any key to start level 1!")
    );

    race.input_tx
        .send(GameEvent::KeyPress)
        .await
        .expect("loop accepts input");
    race.input_tx
        .send(GameEvent::Controls(Controls {
            accelerate: true,
            ..Controls::default()
        }))
        .await
        .expect("loop accepts input");

    // Wait until the player has rolled a few pixels up the screen.
    let mut frame = next_frame(&mut race.frame_rx).await;
    while frame.player.y > 188.0 {
        frame = next_frame(&mut race.frame_rx).await;
    }
    assert_eq!(frame.banner, None);
    assert!(frame.player.velocity > 0.0);

    race.input_tx
        .send(GameEvent::Quit)
        .await
        .expect("loop accepts input");
    let session = race.task.await.expect("race task completes");

    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.game_info().level, 1);
    assert!(session.tick_count() > 0);
}

#[tokio::test]
async fn test_quit_before_start_stops_loop_without_moving() {
    let race = spawn_race();

    race.input_tx
        .send(GameEvent::Quit)
        .await
        .expect("loop accepts input");
    let session = race.task.await.expect("race task completes");

    assert_eq!(session.phase(), Phase::NotStarted);
    assert_eq!(session.game_info(), &GameInfo::new());
    assert_eq!((session.player().body.x, session.player().body.y), (160.0, 190.0));
}

#[tokio::test]
async fn test_closed_input_stops_loop() {
    let race = spawn_race();

    drop(race.input_tx);
    let session = tokio::time::timeout(Duration::from_secs(5), race.task)
        .await
        .expect("loop stops in time")
        .expect("race task completes");

    assert_eq!(session.phase(), Phase::NotStarted);
}

#[tokio::test]
async fn test_shutdown_signal_stops_loop() {
    let race = spawn_race();

    race.shutdown.notify_one();
    let session = tokio::time::timeout(Duration::from_secs(5), race.task)
        .await
        .expect("loop stops in time")
        .expect("race task completes");

    // The input sender is still alive here, so only the signal stopped the loop.
    assert_eq!(session.phase(), Phase::NotStarted);
    drop(race.input_tx);
}

#[tokio::test]
async fn test_pointer_press_extends_route_seen_by_renderer() {
    let mut race = spawn_race();

    race.input_tx
        .send(GameEvent::PointerPress { x: 300, y: 40 })
        .await
        .expect("loop accepts input");

    let mut frame = next_frame(&mut race.frame_rx).await;
    while frame.path.is_empty() {
        frame = next_frame(&mut race.frame_rx).await;
    }
    assert_eq!(frame.path, vec![(300, 40)]);

    race.input_tx
        .send(GameEvent::Quit)
        .await
        .expect("loop accepts input");
    race.task.await.expect("race task completes");
}

#[tokio::test]
async fn test_run_streams_json_frames_until_input_ends() {
    let input: &'static [u8] =
        b"not json\n{\"type\":\"Keys\",\"data\":{\"accelerate\":true}}\n{\"type\":\"Quit\"}\n";
    let (output, mut rendered) = tokio::io::duplex(1 << 16);

    let reader = tokio::spawn(async move {
        let mut text = String::new();
        rendered
            .read_to_string(&mut text)
            .await
            .expect("frames are utf-8");
        text
    });

    track_racer::run(
        input,
        output,
        support::test_assets(),
        RaceSettings::default(),
        TICK,
        Arc::new(Notify::new()),
    )
    .await
    .expect("run completes");

    let text = reader.await.expect("reader completes");
    let first = text.lines().next().expect("at least one frame");
    let frame: serde_json::Value = serde_json::from_str(first).expect("frame is json");

    assert_eq!(frame["banner"], "Press any key to start level 1!");
    assert_eq!(frame["labels"][0]["text"], "Level 1");
    assert_eq!(frame["cars"][0]["image"], "red-car");
    assert_eq!(frame["images"][2]["image"], "finish");
}
