pub mod car;
pub mod level;

pub use car::CarTuning;
pub use level::LevelTuning;
