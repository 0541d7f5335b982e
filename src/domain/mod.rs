// Domain layer: car kinematics, collision masks, waypoint pursuit and level state.

pub mod car;
pub mod game_info;
pub mod mask;
pub mod pilot;
pub mod ports;
pub mod track;
pub mod tuning;

pub use car::{Body, Car, Driver, Sprite, Turn};
pub use game_info::GameInfo;
pub use mask::{Mask, Pixel};
pub use pilot::WaypointPilot;
pub use ports::Clock;
pub use track::{Point, Track};
