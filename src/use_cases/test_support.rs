use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Clock, Mask, Sprite, Track};
use crate::use_cases::race::RaceAssets;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) Duration);

impl Clock for FixedClock {
    fn now(&self) -> Duration {
        self.0
    }
}

pub(crate) const CAR_SIZE: (u32, u32) = (19, 38);
pub(crate) const FINISH_SIZE: (u32, u32) = (76, 13);

// Open field with no walls, the real finish line placement and solid car
// sprites. The computer has no route, so it stays parked unless a test moves it.
pub(crate) fn open_track() -> Track {
    let mut track = Track::new(
        Mask::from_fn(800, 700, |_, _| false),
        Mask::filled(FINISH_SIZE.0, FINISH_SIZE.1),
    );
    track.path = Vec::new();
    track
}

pub(crate) fn assets_for(track: Track) -> RaceAssets {
    RaceAssets {
        track: Arc::new(track),
        player_sprite: Arc::new(Sprite::new("red-car", Mask::filled(CAR_SIZE.0, CAR_SIZE.1))),
        computer_sprite: Arc::new(Sprite::new(
            "green-car",
            Mask::filled(CAR_SIZE.0, CAR_SIZE.1),
        )),
    }
}
