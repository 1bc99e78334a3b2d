use std::f64::consts::PI;

pub const DEGREES_TO_RADIANS: f64 = PI / 180.0;

/// Position and heading of a turtle, y growing upward
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Pose { x, y, heading }
    }

    /// Point reached by travelling `length` along the heading.
    /// Negative lengths travel backward.
    pub fn advanced(&self, length: f64) -> (f64, f64) {
        let (s, c) = (self.heading * DEGREES_TO_RADIANS).sin_cos();
        (self.x + c * length, self.y + s * length)
    }

    pub fn distance_to(&self, other: &Pose) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both poses agree within `tol` on position and heading.
    pub fn approx_eq(&self, other: &Pose, tol: f64) -> bool {
        self.distance_to(other) <= tol && (self.heading - other.heading).abs() <= tol
    }

    /// Apply a left turn with single-wrap normalization.
    pub fn turn_left(&mut self, angle: f64) {
        self.heading = wrap_left(self.heading, angle);
    }

    pub fn turn_right(&mut self, angle: f64) {
        self.heading = wrap_right(self.heading, angle);
    }
}

// Only one wrap is applied: deltas of 360 or more leave the heading out of range.
pub fn wrap_left(heading: f64, angle: f64) -> f64 {
    if heading + angle < 360.0 {
        heading + angle
    } else {
        heading + angle - 360.0
    }
}

pub fn wrap_right(heading: f64, angle: f64) -> f64 {
    if heading - angle >= 0.0 {
        heading - angle
    } else {
        heading - angle + 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_wraps_once_past_360() {
        assert_eq!(wrap_left(300.0, 60.0), 0.0);
        assert_eq!(wrap_left(300.0, 90.0), 30.0);
        assert_eq!(wrap_left(10.0, 20.0), 30.0);
    }

    #[test]
    fn right_wraps_once_below_zero() {
        assert_eq!(wrap_right(0.0, 120.0), 240.0);
        assert_eq!(wrap_right(60.0, 120.0), 300.0);
        assert_eq!(wrap_right(180.0, 180.0), 0.0);
    }

    #[test]
    fn oversized_delta_is_not_folded() {
        // a full modulo would give 10.0
        assert_eq!(wrap_left(0.0, 730.0), 370.0);
    }

    #[test]
    fn left_then_right_restores_heading() {
        for start in [0.0, 45.0, 180.0, 359.0] {
            for a in [0.0, 1.0, 60.0, 120.0, 180.0, 300.0, 359.5] {
                let mut p = Pose::new(0.0, 0.0, start);
                p.turn_left(a);
                p.turn_right(a);
                assert_eq!(p.heading, start, "start {start} angle {a}");
            }
        }
    }

    #[test]
    fn advanced_follows_heading() {
        let p = Pose::new(10.0, 10.0, 90.0);
        let (x, y) = p.advanced(5.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 15.0).abs() < 1e-9);

        let (x, y) = Pose::new(0.0, 0.0, 0.0).advanced(-3.0);
        assert!((x + 3.0).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }
}
