use super::race::RaceSession;
use super::types::{FrameUpdate, GameEvent};
use crate::domain::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Notify, broadcast, mpsc};
use tracing::{debug, info};

/// Drives a race session at a fixed tick rate until quit.
///
/// Each tick drains pending input, advances the session and broadcasts a
/// frame. A `Quit` event, a closed input channel or `shutdown` all stop the
/// loop; dropping `frame_tx` on return shuts the renderer side down.
pub async fn race_task<C: Clock>(
    mut session: RaceSession<C>,
    mut input_rx: mpsc::Receiver<GameEvent>,
    frame_tx: broadcast::Sender<FrameUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) -> RaceSession<C> {
    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // Show the start prompt before the first tick.
    let _ = frame_tx.send(session.frame());

    'ticks: loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!("shutdown requested");
                break;
            }
            _ = interval.tick() => {}
        }

        loop {
            match input_rx.try_recv() {
                Ok(GameEvent::Quit) => {
                    info!("quit requested");
                    break 'ticks;
                }
                Ok(event) => {
                    session.apply(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("input closed");
                    break 'ticks;
                }
            }
        }

        let events = session.tick();
        if !events.is_empty() {
            debug!(tick = session.tick_count(), ?events, "race events");
        }

        // No renderer attached is fine; frames are simply dropped.
        let _ = frame_tx.send(session.frame());
    }

    info!(ticks = session.tick_count(), "race loop stopped");
    session
}
