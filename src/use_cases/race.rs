// Level/race controller: owns both cars and the level state and advances
// them one tick at a time.

use super::types::{
    CarSnapshot, Controls, FrameUpdate, GameEvent, Obstacle, Outcome, Phase, RaceEvent,
};
use crate::domain::tuning::{CarTuning, LevelTuning};
use crate::domain::{Car, Clock, GameInfo, Sprite, Track, Turn};
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable data shared by every session: track geometry and car sprites.
#[derive(Debug, Clone)]
pub struct RaceAssets {
    pub track: Arc<Track>,
    pub player_sprite: Arc<Sprite>,
    pub computer_sprite: Arc<Sprite>,
}

/// Gameplay settings for a session.
#[derive(Debug, Clone, Copy)]
pub struct RaceSettings {
    pub player: CarTuning,
    pub computer: CarTuning,
    pub level: LevelTuning,
    /// Ticks the win/lose banner stays up before the next level can start.
    pub outcome_pause_ticks: u32,
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            player: CarTuning::player(),
            computer: CarTuning::computer(),
            level: LevelTuning::default(),
            // 4.5 s at 60 Hz.
            outcome_pause_ticks: 270,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hold {
    outcome: Outcome,
    ticks_left: u32,
}

pub struct RaceSession<C> {
    track: Arc<Track>,
    player: Car,
    computer: Car,
    game_info: GameInfo,
    controls: Controls,
    hold: Option<Hold>,
    settings: RaceSettings,
    clock: C,
    tick: u64,
}

impl<C: Clock> RaceSession<C> {
    pub fn new(assets: RaceAssets, settings: RaceSettings, clock: C) -> Self {
        let track = assets.track;
        let player = Car::player(settings.player, track.player_start, assets.player_sprite);
        let computer = Car::computer(
            settings.computer,
            track.computer_start,
            assets.computer_sprite,
            track.path.clone(),
        );

        Self {
            track,
            player,
            computer,
            game_info: GameInfo::new(),
            controls: Controls::default(),
            hold: None,
            settings,
            clock,
            tick: 0,
        }
    }

    pub fn player(&self) -> &Car {
        &self.player
    }

    pub fn computer(&self) -> &Car {
        &self.computer
    }

    pub fn game_info(&self) -> &GameInfo {
        &self.game_info
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> Phase {
        match self.hold {
            Some(hold) => Phase::Outcome {
                outcome: hold.outcome,
                ticks_left: hold.ticks_left,
            },
            None if self.game_info.started => Phase::Running,
            None => Phase::NotStarted,
        }
    }

    /// Applies one input event between ticks. `Quit` is left to the caller.
    pub fn apply(&mut self, event: GameEvent) -> Option<RaceEvent> {
        match event {
            GameEvent::Controls(controls) => {
                self.controls = controls;
                None
            }
            GameEvent::KeyPress => {
                if self.phase() != Phase::NotStarted {
                    return None;
                }
                self.game_info.start_level(self.clock.now());
                let level = self.game_info.level;
                info!(level, "level started");
                Some(RaceEvent::LevelStarted { level })
            }
            GameEvent::PointerPress { x, y } => {
                let pilot = self.computer.pilot_mut()?;
                pilot.push_point((x, y));
                debug!(x, y, route_len = pilot.path().len(), "waypoint added");
                Some(RaceEvent::WaypointAdded { x, y })
            }
            GameEvent::Quit => None,
        }
    }

    /// Advances the simulation by one tick. Nothing moves while waiting for
    /// the level start or while an outcome banner is up.
    pub fn tick(&mut self) -> Vec<RaceEvent> {
        self.tick += 1;

        if let Some(hold) = &mut self.hold {
            hold.ticks_left = hold.ticks_left.saturating_sub(1);
            if hold.ticks_left == 0 {
                self.hold = None;
            }
            return Vec::new();
        }
        if !self.game_info.started {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.move_player();
        self.computer.advance();
        self.handle_collision(&mut events);

        if self.game_info.game_finished() {
            info!(tick = self.tick, "game won");
            events.push(RaceEvent::GameWon);
            self.restart_game(Outcome::Won);
        }

        events
    }

    fn move_player(&mut self) {
        let controls = self.controls;
        if controls.left {
            self.player.rotate(Turn::Left);
        }
        if controls.right {
            self.player.rotate(Turn::Right);
        }

        let mut moved = false;
        if controls.accelerate {
            moved = true;
            self.player.accelerate_forward();
        }
        if controls.reverse {
            moved = true;
            self.player.accelerate_backward();
        }
        if !moved {
            self.player.decelerate_idle();
        }
    }

    fn handle_collision(&mut self, events: &mut Vec<RaceEvent>) {
        let track = Arc::clone(&self.track);

        if self.player.collide(&track.border, (0, 0)).is_some() {
            debug!(x = self.player.body.x, y = self.player.body.y, "player hit border");
            self.player.bounce();
            events.push(RaceEvent::PlayerBounced {
                obstacle: Obstacle::Border,
            });
        }

        if self
            .computer
            .collide(&track.finish, track.finish_position)
            .is_some()
        {
            let level = self.game_info.level;
            info!(level, "computer reached the finish line; player lost");
            events.push(RaceEvent::PlayerLost { level });
            self.restart_game(Outcome::Lost);
            return;
        }

        if let Some((_, y)) = self.player.collide(&track.finish, track.finish_position) {
            // Touching the top row means the car came in from the wrong side.
            if y == 0 {
                debug!(x = self.player.body.x, y = self.player.body.y, "player hit finish line from behind");
                self.player.bounce();
                events.push(RaceEvent::PlayerBounced {
                    obstacle: Obstacle::FinishLine,
                });
            } else {
                let level = self.game_info.level;
                let elapsed = self.game_info.level_time(self.clock.now());
                info!(level, elapsed, "level completed");
                events.push(RaceEvent::LevelCompleted { level });

                self.game_info.next_level();
                self.player.reset();
                self.computer
                    .next_level(self.game_info.level, self.settings.level.speed_ramp);
            }
        }
    }

    // Back to level 1 with both cars on the grid, behind an outcome banner.
    // After a win the computer car is parked until the next level completes.
    fn restart_game(&mut self, outcome: Outcome) {
        self.game_info.reset();
        self.player.reset();
        match outcome {
            Outcome::Lost => self.computer.next_level(1, self.settings.level.speed_ramp),
            Outcome::Won => self.computer.reset(),
        }

        if self.settings.outcome_pause_ticks > 0 {
            self.hold = Some(Hold {
                outcome,
                ticks_left: self.settings.outcome_pause_ticks,
            });
        }
    }

    pub fn frame(&self) -> FrameUpdate {
        let banner = match self.phase() {
            Phase::NotStarted => Some(format!(
                "Press any key to start level {}!",
                self.game_info.level
            )),
            Phase::Running => None,
            Phase::Outcome {
                outcome: Outcome::Lost,
                ..
            } => Some("You lost!".to_string()),
            Phase::Outcome {
                outcome: Outcome::Won,
                ..
            } => Some("You won the game !".to_string()),
        };

        FrameUpdate {
            tick: self.tick,
            screen: self.track.size(),
            finish_position: self.track.finish_position,
            level: self.game_info.level,
            level_time: self.game_info.level_time(self.clock.now()),
            player: snapshot(&self.player),
            computer: snapshot(&self.computer),
            path: self
                .computer
                .pilot()
                .map(|pilot| pilot.path().to_vec())
                .unwrap_or_default(),
            banner,
        }
    }
}

fn snapshot(car: &Car) -> CarSnapshot {
    CarSnapshot {
        sprite: car.sprite().name.clone(),
        x: car.body.x,
        y: car.body.y,
        angle: car.body.angle,
        velocity: car.body.velocity,
    }
}
