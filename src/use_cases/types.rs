// Use-case level inputs/outputs for the race loop.

use crate::domain::Point;

/// Polled key state for the four driving controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub reverse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    // Latest key state; replaces the previous one.
    Controls(Controls),
    // Any key went down (starts a waiting level).
    KeyPress,
    // Pointer click; extends the computer car's route.
    PointerPress { x: i32, y: i32 },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstacle {
    Border,
    FinishLine,
}

/// Something the controller decided during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceEvent {
    LevelStarted { level: u32 },
    PlayerBounced { obstacle: Obstacle },
    LevelCompleted { level: u32 },
    PlayerLost { level: u32 },
    GameWon,
    WaypointAdded { x: i32, y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lost,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    // Frozen until a key press starts the level.
    NotStarted,
    Running,
    // Frozen while the outcome banner is shown.
    Outcome { outcome: Outcome, ticks_left: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarSnapshot {
    pub sprite: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub velocity: f64,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUpdate {
    pub tick: u64,
    pub screen: (u32, u32),
    pub finish_position: Point,
    pub level: u32,
    pub level_time: f64,
    pub player: CarSnapshot,
    pub computer: CarSnapshot,
    pub path: Vec<Point>,
    pub banner: Option<String>,
}
