use std::{env, path::PathBuf, time::Duration};

// Runtime constants (not gameplay tuning).

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
pub const FRAME_BROADCAST_CAPACITY: usize = 128;

pub fn assets_dir() -> PathBuf {
    env::var("RACER_ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("assets"))
}

pub fn tick_rate_hz() -> u32 {
    env::var("RACER_TICK_HZ")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|hz| *hz > 0)
        .unwrap_or(60)
}

pub fn tick_interval() -> Duration {
    Duration::from_secs(1) / tick_rate_hz()
}

/// How long the win/lose banner stays up.
pub fn outcome_pause() -> Duration {
    let millis = env::var("RACER_OUTCOME_PAUSE_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(4500);
    Duration::from_millis(millis)
}

/// `pause` expressed in whole ticks at `tick_rate_hz`, rounded up.
pub fn pause_ticks(pause: Duration, tick_rate_hz: u32) -> u32 {
    let ticks = (pause.as_nanos() * u128::from(tick_rate_hz)).div_ceil(1_000_000_000);
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_pause_is_default_then_it_spans_270_ticks_at_60_hz() {
        assert_eq!(pause_ticks(Duration::from_millis(4500), 60), 270);
    }

    #[test]
    fn when_pause_is_zero_then_no_ticks_are_held() {
        assert_eq!(pause_ticks(Duration::ZERO, 60), 0);
    }

    #[test]
    fn when_pause_is_not_a_multiple_then_it_rounds_up() {
        assert_eq!(
            pause_ticks(Duration::from_millis(25), 100),
            3
        );
    }
}
