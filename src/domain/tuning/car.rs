/// Gameplay tuning for a single car.
///
/// Keep this separate from runtime configuration (tick rates, asset paths, etc.).
/// All rates are per tick, not per second.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarTuning {
    /// Maximum forward speed in pixels per tick.
    pub max_velocity: f64,

    /// Rotation speed in degrees per tick while a turn key is held.
    pub rotation_velocity: f64,

    /// Speed gained per tick of throttle (half of it is lost per idle tick).
    pub acceleration: f64,
}

impl CarTuning {
    /// The human-driven car.
    pub fn player() -> Self {
        Self {
            max_velocity: 3.0,
            rotation_velocity: 3.5,
            acceleration: 0.08,
        }
    }

    /// The waypoint-following car. Its turn rate comes from its speed, so
    /// `rotation_velocity` is only kept for parity with the player.
    pub fn computer() -> Self {
        Self {
            max_velocity: 2.4,
            rotation_velocity: 3.48,
            acceleration: 0.08,
        }
    }
}

impl Default for CarTuning {
    fn default() -> Self {
        Self::player()
    }
}
