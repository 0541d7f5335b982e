use std::time::Duration;

/// Level progression and timing for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub level: u32,
    pub started: bool,
    // Only meaningful while `started` is true.
    level_start_time: Duration,
}

impl GameInfo {
    pub const LEVELS: u32 = 10;

    pub fn new() -> Self {
        Self {
            level: 1,
            started: false,
            level_start_time: Duration::ZERO,
        }
    }

    /// Moves to the next level; it waits for a new start signal.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.started = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn game_finished(&self) -> bool {
        self.level > Self::LEVELS
    }

    pub fn start_level(&mut self, now: Duration) {
        self.started = true;
        self.level_start_time = now;
    }

    /// Seconds since the level started, or 0 while waiting for the start.
    pub fn level_time(&self, now: Duration) -> f64 {
        if !self.started {
            return 0.0;
        }
        now.saturating_sub(self.level_start_time).as_secs_f64()
    }
}

impl Default for GameInfo {
    fn default() -> Self {
        Self::new()
    }
}
