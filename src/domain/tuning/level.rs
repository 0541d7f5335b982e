/// Gameplay tuning for level progression.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTuning {
    /// Extra computer speed (pixels per tick) added for each level above the first.
    pub speed_ramp: f64,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self { speed_ramp: 0.111 }
    }
}
