// Line protocol DTOs exchanged with the external renderer and input source.

use crate::use_cases::{Controls, FrameUpdate, GameEvent};
use crate::use_cases::types::CarSnapshot;
use serde::{Deserialize, Serialize};

// Text rows are anchored to the bottom edge; this is the font's line height.
const LABEL_HEIGHT: i32 = 30;

/// Messages the input source sends, one JSON object per line.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    // Full key state for the driving controls.
    Keys(KeysDto),
    // Any key went down.
    KeyPress,
    // Pointer click in screen coordinates.
    PointerPress { x: i32, y: i32 },
    Quit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeysDto {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub accelerate: bool,
    #[serde(default)]
    pub reverse: bool,
}

impl From<ClientMessage> for GameEvent {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Keys(keys) => GameEvent::Controls(Controls {
                left: keys.left,
                right: keys.right,
                accelerate: keys.accelerate,
                reverse: keys.reverse,
            }),
            ClientMessage::KeyPress => GameEvent::KeyPress,
            ClientMessage::PointerPress { x, y } => GameEvent::PointerPress { x, y },
            ClientMessage::Quit => GameEvent::Quit,
        }
    }
}

/// One rendered frame: background draw calls in order, HUD labels, cars and
/// an optional centered banner.
#[derive(Debug, Clone, Serialize)]
pub struct FrameDto {
    pub tick: u64,
    pub images: Vec<DrawCallDto>,
    pub labels: Vec<LabelDto>,
    pub cars: Vec<CarDto>,
    // Route of the computer car, for an optional debug overlay.
    pub path: Vec<(i32, i32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawCallDto {
    pub image: &'static str,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelDto {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Car sprite drawn rotated about its center; `x`/`y` is the unrotated top-left.
#[derive(Debug, Clone, Serialize)]
pub struct CarDto {
    pub image: String,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl From<&CarSnapshot> for CarDto {
    fn from(car: &CarSnapshot) -> Self {
        Self {
            image: car.sprite.clone(),
            x: car.x,
            y: car.y,
            angle: car.angle,
        }
    }
}

impl From<FrameUpdate> for FrameDto {
    fn from(update: FrameUpdate) -> Self {
        let height = update.screen.1 as i32;
        let (finish_x, finish_y) = update.finish_position;

        let images = vec![
            DrawCallDto { image: "grass", x: 0, y: 0 },
            DrawCallDto { image: "track", x: 0, y: 0 },
            DrawCallDto { image: "finish", x: finish_x, y: finish_y },
            DrawCallDto { image: "track-border", x: 0, y: 0 },
        ];

        let labels = vec![
            LabelDto {
                text: format!("Level {}", update.level),
                x: 10,
                y: height - LABEL_HEIGHT - 70,
            },
            LabelDto {
                text: format!("Time: {:.1}s", update.level_time),
                x: 10,
                y: height - LABEL_HEIGHT - 40,
            },
            LabelDto {
                text: format!("Velocity: {:.1}px/s", update.player.velocity),
                x: 10,
                y: height - LABEL_HEIGHT - 10,
            },
        ];

        Self {
            tick: update.tick,
            images,
            labels,
            cars: vec![CarDto::from(&update.player), CarDto::from(&update.computer)],
            path: update.path,
            banner: update.banner,
        }
    }
}
