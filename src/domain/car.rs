// Car state and per-tick kinematics shared by the player and the computer car.

use crate::domain::mask::{Mask, Pixel};
use crate::domain::pilot::WaypointPilot;
use crate::domain::track::Point;
use crate::domain::tuning::CarTuning;
use std::sync::Arc;

/// Read-only sprite data: the draw handle plus the collision mask built from
/// the unrotated image.
#[derive(Debug)]
pub struct Sprite {
    pub name: String,
    pub mask: Mask,
}

impl Sprite {
    pub fn new(name: impl Into<String>, mask: Mask) -> Self {
        Self {
            name: name.into(),
            mask,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.mask.width(), self.mask.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Kinematic record shared by both car variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    // Top-left of the sprite, not its center.
    pub x: f64,
    pub y: f64,
    /// Degrees; 0 faces up, positive turns counter-clockwise. Never normalized.
    pub angle: f64,
    /// Pixels per tick; negative means reversing.
    pub velocity: f64,
    pub max_velocity: f64,
    pub rotation_velocity: f64,
    pub acceleration: f64,
    pub start: (f64, f64),
}

impl Body {
    pub fn new(tuning: CarTuning, start: (f64, f64)) -> Self {
        Self {
            x: start.0,
            y: start.1,
            angle: 0.0,
            velocity: 0.0,
            max_velocity: tuning.max_velocity,
            rotation_velocity: tuning.rotation_velocity,
            acceleration: tuning.acceleration,
            start,
        }
    }

    /// Moves the body one tick along its heading. y grows downward, so a
    /// positive velocity at angle 0 moves up the screen.
    pub fn integrate(&mut self) {
        let radians = self.angle.to_radians();
        self.x -= self.velocity * radians.sin();
        self.y -= self.velocity * radians.cos();
    }

    pub fn reset(&mut self) {
        (self.x, self.y) = self.start;
        self.angle = 0.0;
        self.velocity = 0.0;
    }
}

/// Who decides where the car goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Driver {
    Player,
    Computer(WaypointPilot),
}

#[derive(Debug, Clone)]
pub struct Car {
    pub body: Body,
    pub driver: Driver,
    sprite: Arc<Sprite>,
}

impl Car {
    pub fn player(tuning: CarTuning, start: (f64, f64), sprite: Arc<Sprite>) -> Self {
        Self {
            body: Body::new(tuning, start),
            driver: Driver::Player,
            sprite,
        }
    }

    /// A computer car starts rolling at its max velocity.
    pub fn computer(
        tuning: CarTuning,
        start: (f64, f64),
        sprite: Arc<Sprite>,
        path: Vec<Point>,
    ) -> Self {
        let mut body = Body::new(tuning, start);
        body.velocity = body.max_velocity;
        Self {
            body,
            driver: Driver::Computer(WaypointPilot::new(path)),
            sprite,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn pilot(&self) -> Option<&WaypointPilot> {
        match &self.driver {
            Driver::Computer(pilot) => Some(pilot),
            Driver::Player => None,
        }
    }

    pub fn pilot_mut(&mut self) -> Option<&mut WaypointPilot> {
        match &mut self.driver {
            Driver::Computer(pilot) => Some(pilot),
            Driver::Player => None,
        }
    }

    pub fn rotate(&mut self, turn: Turn) {
        match turn {
            Turn::Left => self.body.angle += self.body.rotation_velocity,
            Turn::Right => self.body.angle -= self.body.rotation_velocity,
        }
    }

    pub fn accelerate_forward(&mut self) {
        self.body.velocity = (self.body.velocity + self.body.acceleration).min(self.body.max_velocity);
        self.advance();
    }

    pub fn accelerate_backward(&mut self) {
        self.body.velocity =
            (self.body.velocity - self.body.acceleration).max(-self.body.max_velocity / 2.0);
        self.advance();
    }

    /// Coasting friction. Only ever brings the speed down to zero from above;
    /// a reversing car stops dead on the first idle tick.
    pub fn decelerate_idle(&mut self) {
        self.body.velocity = (self.body.velocity - self.body.acceleration / 2.0).max(0.0);
        self.advance();
    }

    /// Reflects and halves the speed, then moves once to back off the obstacle.
    pub fn bounce(&mut self) {
        self.body.velocity = -self.body.velocity / 2.0;
        self.advance();
    }

    /// One tick of motion. The player integrates directly; the computer car
    /// steers along its route first and stops once the route is exhausted.
    pub fn advance(&mut self) {
        let size = self.sprite.size();
        match &mut self.driver {
            Driver::Player => self.body.integrate(),
            Driver::Computer(pilot) => pilot.drive(&mut self.body, size),
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
    }

    /// Prepares the computer car for `level`: back to the start line, speed
    /// raised by `speed_ramp` per level above the first, route restarted.
    /// The player car is only reset.
    pub fn next_level(&mut self, level: u32, speed_ramp: f64) {
        self.reset();
        if let Driver::Computer(pilot) = &mut self.driver {
            self.body.velocity =
                self.body.max_velocity + f64::from(level.saturating_sub(1)) * speed_ramp;
            pilot.restart();
        }
    }

    /// Exact pixel test of this car's sprite against `mask`, whose top-left
    /// sits at `mask_position`. Returns the first shared pixel in `mask`'s frame.
    pub fn collide(&self, mask: &Mask, mask_position: Point) -> Option<Pixel> {
        let offset = (
            (self.body.x - f64::from(mask_position.0)) as i32,
            (self.body.y - f64::from(mask_position.1)) as i32,
        );
        mask.overlap(&self.sprite.mask, offset)
    }
}
