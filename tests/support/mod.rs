// Shared fixtures for race loop integration tests.
use std::sync::Arc;

use track_racer::domain::{Mask, Sprite, Track};
use track_racer::use_cases::RaceAssets;

// Wall-free track with the real finish line placement and an empty computer
// route, so nothing ends a level unless a test drives it there.
pub fn test_assets() -> RaceAssets {
    let mut track = Track::new(Mask::from_fn(800, 700, |_, _| false), Mask::filled(76, 13));
    track.path = Vec::new();

    RaceAssets {
        track: Arc::new(track),
        player_sprite: Arc::new(Sprite::new("red-car", Mask::filled(19, 38))),
        computer_sprite: Arc::new(Sprite::new("green-car", Mask::filled(19, 38))),
    }
}
