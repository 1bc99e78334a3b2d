//! Turtle graphics engine.
//!
//! A [`Turtle`] carries a pose, a pen (up/down, color, thickness) and the
//! [`Canvas`] it draws on. Moves with the pen down are rasterized by dense
//! sampling: every segment is split into [`POINTS_PER_LINE`] evenly spaced
//! points and a `thickness`-sided square is stamped at each one.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::math::Pose;

/// Samples taken along every drawn segment
pub const POINTS_PER_LINE: usize = 10_000;

/// What to do with a pixel write that falls outside the canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Drop the write and count it
    #[default]
    Clip,
    /// Fail the move with `Error::OutOfBounds`
    Strict,
}

/// A single turtle instruction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    PenUp,
    PenDown,
    Left(f64),
    Right(f64),
    Forward(f64),
    Backward(f64),
    PenColor(Rgb),
    PenSize(u32),
}

/// Receiver of turtle instructions: a live turtle draws them, a
/// `Vec<Command>` just records them.
pub trait CommandSink {
    fn execute(&mut self, command: Command) -> Result<()>;
}

impl CommandSink for Vec<Command> {
    fn execute(&mut self, command: Command) -> Result<()> {
        self.push(command);
        Ok(())
    }
}

#[derive(Debug)]
pub struct Turtle {
    pose: Pose,
    pen_down: bool,
    color: Rgb,
    thickness: u32,
    canvas: Canvas,
    boundary: BoundaryPolicy,
    clipped: u64,
}

impl Turtle {
    /// Create a turtle on a fresh white `width x height` canvas with a black pen.
    pub fn new(
        heading: f64,
        x: f64,
        y: f64,
        pen_down: bool,
        height: usize,
        width: usize,
        thickness: u32,
    ) -> Result<Self> {
        if thickness == 0 {
            return Err(Error::InvalidThickness(thickness));
        }
        if !x.is_finite() || !y.is_finite() || !heading.is_finite() {
            return Err(Error::InvalidPose { x, y, heading });
        }
        let canvas = Canvas::new(width, height)?;
        debug!(
            "turtle at ({x}, {y}) heading {heading} on {width}x{height} canvas, pen size {thickness}"
        );
        Ok(Turtle {
            pose: Pose::new(x, y, heading),
            pen_down,
            color: Rgb::BLACK,
            thickness,
            canvas,
            boundary: BoundaryPolicy::default(),
            clipped: 0,
        })
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary = policy;
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> (f64, f64) {
        (self.pose.x, self.pose.y)
    }

    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Pixel writes dropped so far under `BoundaryPolicy::Clip`
    pub fn clipped_writes(&self) -> u64 {
        self.clipped
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    pub fn turn_left(&mut self, angle: f64) {
        check_turn(angle);
        self.pose.turn_left(angle);
    }

    pub fn turn_right(&mut self, angle: f64) {
        check_turn(angle);
        self.pose.turn_right(angle);
    }

    pub fn forward(&mut self, length: f64) -> Result<()> {
        self.travel(length)
    }

    pub fn backward(&mut self, length: f64) -> Result<()> {
        self.travel(-length)
    }

    pub fn set_pen_size(&mut self, thickness: u32) -> Result<()> {
        if thickness == 0 {
            return Err(Error::InvalidThickness(thickness));
        }
        self.thickness = thickness;
        Ok(())
    }

    pub fn set_pen_color(&mut self, r: u8, g: u8, b: u8) {
        self.color = Rgb::new(r, g, b);
    }

    /// Stamp the pen color as a `thickness x thickness` block around `(x, y)`.
    ///
    /// `y` grows upward while canvas rows grow downward, so the block's rows
    /// are `height - y + t/2 - j` for `j in 0..t`. A `y` of zero therefore
    /// lands one row below the canvas. Coordinates far off the canvas
    /// saturate instead of overflowing and go through the boundary policy.
    pub fn set_pixel(&mut self, x: i64, y: i64) -> Result<()> {
        let t = self.thickness as i64;
        for j in 0..t {
            let row = self.block_row(y, j);
            for k in 0..t {
                let col = self.block_col(x, k);
                if self.canvas.put(row, col, self.color) {
                    continue;
                }
                match self.boundary {
                    BoundaryPolicy::Clip => self.clipped += 1,
                    BoundaryPolicy::Strict => return Err(self.out_of_bounds(row, col)),
                }
            }
        }
        Ok(())
    }

    fn block_row(&self, y: i64, j: i64) -> i64 {
        let half = self.thickness as i64 / 2;
        (self.canvas.height() as i64)
            .saturating_sub(y)
            .saturating_add(half)
            .saturating_sub(j)
    }

    fn block_col(&self, x: i64, k: i64) -> i64 {
        let half = self.thickness as i64 / 2;
        x.saturating_sub(half).saturating_add(k)
    }

    /// First pixel of the block around `(x, y)` that misses the canvas
    fn block_overflow(&self, x: i64, y: i64) -> Option<(i64, i64)> {
        let t = self.thickness as i64;
        let (width, height) = (self.canvas.width() as i64, self.canvas.height() as i64);
        (0..t)
            .flat_map(|j| (0..t).map(move |k| (j, k)))
            .map(|(j, k)| (self.block_row(y, j), self.block_col(x, k)))
            .find(|&(row, col)| row < 0 || col < 0 || row >= height || col >= width)
    }

    fn out_of_bounds(&self, row: i64, col: i64) -> Error {
        Error::OutOfBounds {
            row,
            col,
            width: self.canvas.width(),
            height: self.canvas.height(),
        }
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match *command {
            Command::PenUp => self.pen_up(),
            Command::PenDown => self.pen_down(),
            Command::Left(angle) => self.turn_left(angle),
            Command::Right(angle) => self.turn_right(angle),
            Command::Forward(length) => self.forward(length)?,
            Command::Backward(length) => self.backward(length)?,
            Command::PenColor(c) => self.set_pen_color(c.r, c.g, c.b),
            Command::PenSize(t) => self.set_pen_size(t)?,
        }
        Ok(())
    }

    fn travel(&mut self, length: f64) -> Result<()> {
        let (x2, y2) = self.pose.advanced(length);
        if self.pen_down {
            self.stroke(x2, y2)?;
        }
        // Land on the exact destination, not the last sample.
        self.pose.x = x2;
        self.pose.y = y2;
        Ok(())
    }

    fn stroke(&mut self, x2: f64, y2: f64) -> Result<()> {
        let (x1, y1) = (self.pose.x, self.pose.y);
        let steps = POINTS_PER_LINE as f64;
        let dx = (x2 - x1) / steps;
        let dy = (y2 - y1) / steps;
        let sample = |i: usize| {
            let t = i as f64;
            ((x1 + dx * t) as i64, (y1 + dy * t) as i64)
        };

        // Samples are monotone along each axis, so the first and last blocks
        // bound the stroke. Strict strokes are checked before any pixel is written.
        if self.boundary == BoundaryPolicy::Strict {
            for (x, y) in [sample(0), sample(POINTS_PER_LINE - 1)] {
                if let Some((row, col)) = self.block_overflow(x, y) {
                    return Err(self.out_of_bounds(row, col));
                }
            }
        }

        let clipped_before = self.clipped;
        for i in 0..POINTS_PER_LINE {
            let (x, y) = sample(i);
            self.set_pixel(x, y)?;
        }

        let clipped = self.clipped - clipped_before;
        if clipped > 0 {
            warn!(
                "stroke ({x1:.1}, {y1:.1}) -> ({x2:.1}, {y2:.1}) left the {}x{} canvas, {clipped} pixel writes dropped",
                self.canvas.width(),
                self.canvas.height()
            );
        }
        debug!("stroke ({x1:.1}, {y1:.1}) -> ({x2:.1}, {y2:.1})");
        Ok(())
    }
}

impl CommandSink for Turtle {
    fn execute(&mut self, command: Command) -> Result<()> {
        self.apply(&command)
    }
}

fn check_turn(angle: f64) {
    if angle.abs() >= 360.0 {
        warn!("turn of {angle} degrees is wrapped only once, heading may leave [0, 360)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turtle(x: f64, y: f64, width: usize, height: usize, thickness: u32) -> Turtle {
        Turtle::new(0.0, x, y, false, height, width, thickness).unwrap()
    }

    #[test]
    fn new_turtle_defaults() {
        let t = Turtle::new(0.0, 200.0, 200.0, false, 2000, 2000, 3).unwrap();
        assert_eq!(t.position(), (200.0, 200.0));
        assert_eq!(t.heading(), 0.0);
        assert!(!t.is_pen_down());
        assert_eq!(t.color(), Rgb::BLACK);
        assert_eq!(t.thickness(), 3);
        assert_eq!(t.canvas().as_bytes().len(), 2000 * 2000 * 3);
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            Turtle::new(0.0, 0.0, 0.0, false, 10, 10, 0),
            Err(Error::InvalidThickness(0))
        ));
        assert!(matches!(
            Turtle::new(0.0, 0.0, 0.0, false, 0, 10, 1),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn pen_toggles_only_the_flag() {
        let mut t = turtle(5.0, 5.0, 10, 10, 1);
        let before = t.pose();
        t.pen_down();
        assert!(t.is_pen_down());
        t.pen_up();
        assert!(!t.is_pen_down());
        assert_eq!(t.pose(), before);
        assert_eq!(t.canvas().painted().count(), 0);
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut t = turtle(2.0, 5.0, 20, 10, 1);
        t.forward(10.0).unwrap();
        assert_eq!(t.position(), (12.0, 5.0));
        assert_eq!(t.canvas().painted().count(), 0);
    }

    #[test]
    fn pen_down_draws_sampled_line() {
        let mut t = turtle(2.0, 5.0, 20, 10, 1);
        t.set_pen_color(10, 20, 30);
        t.pen_down();
        t.forward(10.0).unwrap();

        let painted: Vec<_> = t.canvas().painted().collect();
        // end point excluded, truncated x runs 2..=11 on row height - 5
        assert_eq!(painted.len(), 10);
        for (i, (row, col, c)) in painted.into_iter().enumerate() {
            assert_eq!(row, 5);
            assert_eq!(col, 2 + i);
            assert_eq!(c, Rgb::new(10, 20, 30));
        }
        assert_eq!(t.position(), (12.0, 5.0));
    }

    #[test]
    fn forward_then_backward_restores_position() {
        let mut t = Turtle::new(0.0, 100.0, 100.0, true, 300, 300, 2).unwrap();
        for heading_step in [0.0, 37.0, 60.0, 120.0, 300.0] {
            t.turn_left(heading_step);
            let start = t.pose();
            t.forward(73.0).unwrap();
            t.backward(73.0).unwrap();
            assert!(t.pose().approx_eq(&start, 1e-9));
        }
    }

    #[test]
    fn set_pixel_flips_vertical_axis() {
        let mut t = turtle(0.0, 0.0, 10, 10, 1);
        t.set_pixel(2, 3).unwrap();
        let painted: Vec<_> = t.canvas().painted().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(painted, vec![(7, 2)]);
    }

    #[test]
    fn set_pixel_stamps_thick_block() {
        let mut t = turtle(0.0, 0.0, 10, 10, 3);
        t.set_pixel(2, 3).unwrap();
        let mut painted: Vec<_> = t.canvas().painted().map(|(r, c, _)| (r, c)).collect();
        painted.sort();
        let expected: Vec<_> = (6..=8).flat_map(|r| (1..=3).map(move |c| (r, c))).collect();
        assert_eq!(painted, expected);
    }

    #[test]
    fn clip_policy_counts_dropped_writes() {
        let mut t = turtle(0.0, 0.0, 10, 10, 1);
        // y == 0 maps to row `height`, one past the last row
        t.set_pixel(0, 0).unwrap();
        assert_eq!(t.clipped_writes(), 1);
        assert_eq!(t.canvas().painted().count(), 0);

        let mut t = turtle(0.0, 0.0, 10, 10, 3);
        t.set_pixel(0, 5).unwrap();
        // column -1 for each of the three rows
        assert_eq!(t.clipped_writes(), 3);
        assert_eq!(t.canvas().painted().count(), 6);
    }

    #[test]
    fn strict_policy_fails_out_of_canvas() {
        let mut t = turtle(5.0, 5.0, 10, 10, 1).with_boundary_policy(BoundaryPolicy::Strict);
        t.pen_down();
        let err = t.forward(20.0).unwrap_err();
        // reported at the far end of the stroke, x = 24
        assert!(matches!(err, Error::OutOfBounds { row: 5, col: 24, .. }));
        // a failed stroke neither moves the turtle nor paints anything
        assert_eq!(t.position(), (5.0, 5.0));
        assert_eq!(t.canvas().painted().count(), 0);
    }

    #[test]
    fn far_off_canvas_strokes_do_not_overflow() {
        let mut t = Turtle::new(0.0, 1e300, 10.0, true, 50, 50, 3).unwrap();
        t.forward(10.0).unwrap();
        assert_eq!(t.clipped_writes(), (POINTS_PER_LINE * 9) as u64);

        let mut t = Turtle::new(0.0, 10.0, -1e300, true, 50, 50, 3).unwrap();
        t.forward(10.0).unwrap();
        assert_eq!(t.clipped_writes(), (POINTS_PER_LINE * 9) as u64);
        assert_eq!(t.canvas().painted().count(), 0);

        let mut t = turtle(0.0, 0.0, 50, 50, 3);
        t.set_pixel(i64::MAX, 10).unwrap();
        t.set_pixel(i64::MIN, i64::MIN).unwrap();
        assert_eq!(t.clipped_writes(), 18);

        let mut t = Turtle::new(0.0, 1e300, 10.0, true, 50, 50, 3)
            .unwrap()
            .with_boundary_policy(BoundaryPolicy::Strict);
        let err = t.forward(10.0).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { row: 41, col, .. } if col == i64::MAX - 1));
        assert_eq!(t.canvas().painted().count(), 0);
    }

    #[test]
    fn rejects_non_finite_start() {
        let poses = [
            (f64::NAN, 0.0, 0.0),
            (0.0, f64::INFINITY, 0.0),
            (0.0, 0.0, f64::NEG_INFINITY),
        ];
        for (x, y, heading) in poses {
            assert!(matches!(
                Turtle::new(heading, x, y, false, 10, 10, 1),
                Err(Error::InvalidPose { .. })
            ));
        }
    }

    #[test]
    fn turns_normalize_once() {
        let mut t = turtle(0.0, 0.0, 10, 10, 1);
        t.turn_right(120.0);
        assert_eq!(t.heading(), 240.0);
        t.turn_left(180.0);
        assert_eq!(t.heading(), 60.0);
        t.turn_left(300.0);
        assert_eq!(t.heading(), 0.0);
    }

    #[test]
    fn apply_and_record_commands() {
        let mut recorded: Vec<Command> = Vec::new();
        let script = [
            Command::PenSize(2),
            Command::PenColor(Rgb::new(1, 2, 3)),
            Command::PenDown,
            Command::Forward(4.0),
            Command::Left(90.0),
            Command::Backward(1.0),
            Command::Right(90.0),
            Command::PenUp,
        ];
        let mut t = turtle(3.0, 5.0, 20, 20, 1);
        for cmd in script {
            recorded.execute(cmd).unwrap();
            t.execute(cmd).unwrap();
        }
        assert_eq!(recorded, script.to_vec());
        assert_eq!(t.thickness(), 2);
        assert_eq!(t.color(), Rgb::new(1, 2, 3));
        assert!(!t.is_pen_down());
        assert_eq!(t.heading(), 0.0);
        let (x, y) = t.position();
        assert!((x - 7.0).abs() < 1e-9 && (y - 4.0).abs() < 1e-9);
        assert!(t.canvas().painted().count() > 0);
        assert!(matches!(t.apply(&Command::PenSize(0)), Err(Error::InvalidThickness(0))));
    }
}
