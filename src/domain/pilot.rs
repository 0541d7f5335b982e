// Waypoint pursuit for the computer-controlled car.

use crate::domain::car::Body;
use crate::domain::track::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPilot {
    path: Vec<Point>,
    current_point: usize,
}

impl WaypointPilot {
    pub fn new(path: Vec<Point>) -> Self {
        Self {
            path,
            current_point: 0,
        }
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Index of the waypoint currently pursued; equals `path().len()` once
    /// the route is exhausted.
    pub fn current_point(&self) -> usize {
        self.current_point
    }

    /// Next waypoint to reach, if any.
    pub fn target(&self) -> Option<Point> {
        self.path.get(self.current_point).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.current_point >= self.path.len()
    }

    /// Extends the route. Also revives a pilot that had run out of points.
    pub fn push_point(&mut self, point: Point) {
        self.path.push(point);
    }

    pub fn restart(&mut self) {
        self.current_point = 0;
    }

    /// Runs one tick of pursuit: turn toward the target, mark it reached if
    /// the sprite covers it, then integrate. Does nothing once finished.
    pub fn drive(&mut self, body: &mut Body, size: (u32, u32)) {
        let Some(target) = self.target() else {
            return;
        };

        turn_toward(body, target);
        if covers(body, size, target) {
            self.current_point += 1;
        }

        body.integrate();
    }
}

/// Heading (radians, same convention as `Body::angle`) that points from the
/// car's origin to `target`.
pub fn desired_heading(x: f64, y: f64, target: Point) -> f64 {
    let (target_x, target_y) = (f64::from(target.0), f64::from(target.1));
    let x_diff = target_x - x;
    let y_diff = target_y - y;

    let mut heading = if y_diff == 0.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        (x_diff / y_diff).atan()
    };

    // atan cannot tell "ahead" from "behind"; flip when the target is below.
    if target_y > y {
        heading += std::f64::consts::PI;
    }
    heading
}

/// Turns the body toward `target`. The turn per tick is capped by the
/// current speed rather than a rotation constant.
fn turn_toward(body: &mut Body, target: Point) {
    let mut difference = body.angle - desired_heading(body.x, body.y, target).to_degrees();

    // Single wrap only: differences of 540 degrees or more stay unwrapped.
    if difference >= 180.0 {
        difference -= 360.0;
    }

    let step = body.velocity.min(difference.abs());
    if difference > 0.0 {
        body.angle -= step;
    } else {
        body.angle += step;
    }
}

/// Whether the sprite's axis-aligned rectangle contains `point`.
fn covers(body: &Body, size: (u32, u32), point: Point) -> bool {
    let left = body.x as i64;
    let top = body.y as i64;
    let (px, py) = (i64::from(point.0), i64::from(point.1));

    px >= left && px < left + i64::from(size.0) && py >= top && py < top + i64::from(size.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tuning::CarTuning;

    fn body_at(x: f64, y: f64, velocity: f64) -> Body {
        let mut body = Body::new(CarTuning::computer(), (x, y));
        body.velocity = velocity;
        body
    }

    #[test]
    fn when_target_is_level_with_car_then_heading_is_quarter_turn_without_flip() {
        // ty == y: the "below" branch must not fire.
        let heading = desired_heading(0.0, 0.0, (100, 0));

        assert_eq!(heading, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn when_target_is_straight_below_then_heading_is_flipped() {
        let heading = desired_heading(0.0, 0.0, (0, 50));

        assert!((heading.to_degrees() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn when_target_is_up_and_left_then_heading_is_positive() {
        // Up-left is a counter-clockwise turn from "up".
        let heading = desired_heading(100.0, 100.0, (0, 0));

        assert!((heading.to_degrees() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn when_difference_is_large_then_turn_is_capped_by_velocity() {
        let mut body = body_at(0.0, 0.0, 2.0);

        turn_toward(&mut body, (100, 0));

        // Desired is 90 degrees, current 0: turn +2 (capped by speed).
        assert!((body.angle - 2.0).abs() < 1e-9);
    }

    #[test]
    fn when_difference_is_small_then_heading_snaps_to_target() {
        let mut body = body_at(0.0, 0.0, 5.0);
        body.angle = 88.0;

        turn_toward(&mut body, (100, 0));

        assert!((body.angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn when_difference_exceeds_half_turn_then_car_turns_the_short_way() {
        // Desired 90, current 300: raw difference 210 wraps to -150, so the
        // angle increases.
        let mut body = body_at(0.0, 0.0, 3.0);
        body.angle = 300.0;

        turn_toward(&mut body, (100, 0));

        assert!((body.angle - 303.0).abs() < 1e-9);
    }

    #[test]
    fn when_difference_is_beyond_one_wrap_then_only_one_correction_is_applied() {
        // Raw difference 630 becomes 270 (> 0): the car turns clockwise.
        let mut body = body_at(0.0, 0.0, 3.0);
        body.angle = 720.0;

        turn_toward(&mut body, (100, 0));

        assert!((body.angle - 717.0).abs() < 1e-9);
    }

    #[test]
    fn when_sprite_covers_target_then_current_point_advances_once() {
        let mut pilot = WaypointPilot::new(vec![(5, 5), (500, 500)]);
        let mut body = body_at(0.0, 0.0, 0.0);

        pilot.drive(&mut body, (10, 10));
        assert_eq!(pilot.current_point(), 1);

        // Next target is far away; standing still never advances again.
        pilot.drive(&mut body, (10, 10));
        assert_eq!(pilot.current_point(), 1);
    }

    #[test]
    fn when_target_sits_on_rect_far_edge_then_it_is_not_covered() {
        let body = body_at(0.0, 0.0, 0.0);

        assert!(covers(&body, (10, 10), (9, 9)));
        assert!(!covers(&body, (10, 10), (10, 5)));
        assert!(!covers(&body, (10, 10), (5, 10)));
    }

    #[test]
    fn when_route_is_exhausted_then_pilot_never_moves_past_the_end() {
        let mut pilot = WaypointPilot::new(vec![(1, 1)]);
        let mut body = body_at(0.0, 0.0, 2.0);

        pilot.drive(&mut body, (10, 10));
        assert_eq!(pilot.current_point(), 1);
        assert!(pilot.is_finished());

        let (x, y, angle) = (body.x, body.y, body.angle);
        for _ in 0..5 {
            pilot.drive(&mut body, (10, 10));
        }

        assert_eq!(pilot.current_point(), 1);
        assert_eq!((body.x, body.y, body.angle), (x, y, angle));
    }

    #[test]
    fn when_path_is_empty_then_pilot_idles() {
        let mut pilot = WaypointPilot::new(Vec::new());
        let mut body = body_at(10.0, 10.0, 2.0);

        pilot.drive(&mut body, (10, 10));

        assert!(pilot.is_finished());
        assert_eq!((body.x, body.y), (10.0, 10.0));
    }

    #[test]
    fn when_point_is_appended_after_finishing_then_pursuit_resumes() {
        let mut pilot = WaypointPilot::new(Vec::new());
        let mut body = body_at(0.0, 100.0, 2.0);

        pilot.push_point((0, 0));
        pilot.drive(&mut body, (10, 10));

        assert!(!pilot.is_finished());
        assert!((body.y - 98.0).abs() < 1e-9);
    }
}
