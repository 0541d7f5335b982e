// Use cases layer: the race controller and the loop that drives it.

pub mod game;
pub mod race;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;

pub use race::{RaceAssets, RaceSession, RaceSettings};
pub use types::{Controls, FrameUpdate, GameEvent, Outcome, Phase, RaceEvent};
