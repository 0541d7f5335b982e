// Fixed track geometry and the collision masks derived from the track images.

use crate::domain::mask::Mask;

/// Integer screen-space point (y grows downward).
pub type Point = (i32, i32);

/// Closed racing line followed by the computer car.
pub const PATH: [Point; 25] = [
    (154, 111),
    (74, 74),
    (52, 196),
    (55, 398),
    (87, 470),
    (267, 635),
    (360, 531),
    (365, 467),
    (478, 428),
    (535, 560),
    (539, 623),
    (656, 570),
    (658, 433),
    (659, 378),
    (402, 324),
    (416, 231),
    (609, 231),
    (661, 154),
    (637, 79),
    (377, 60),
    (294, 65),
    (246, 199),
    (247, 336),
    (157, 306),
    (150, 234),
];

/// Top-left corner of the finish line image on screen.
pub const FINISH_POSITION: Point = (115, 230);

pub const PLAYER_START: (f64, f64) = (160.0, 190.0);
pub const COMPUTER_START: (f64, f64) = (135.0, 190.0);

/// Track geometry: collision masks, start grid and the computer's route.
/// Built once at startup.
#[derive(Debug, Clone)]
pub struct Track {
    /// Walls, in screen coordinates (the border image is drawn at the origin).
    pub border: Mask,
    /// Finish line, in its own frame; placed at `finish_position`.
    pub finish: Mask,
    pub finish_position: Point,
    pub player_start: (f64, f64),
    pub computer_start: (f64, f64),
    /// Initial route of the computer car.
    pub path: Vec<Point>,
}

impl Track {
    pub fn new(border: Mask, finish: Mask) -> Self {
        Self {
            border,
            finish,
            finish_position: FINISH_POSITION,
            player_start: PLAYER_START,
            computer_start: COMPUTER_START,
            path: PATH.to_vec(),
        }
    }

    /// Screen size, taken from the border image.
    pub fn size(&self) -> (u32, u32) {
        (self.border.width(), self.border.height())
    }
}
