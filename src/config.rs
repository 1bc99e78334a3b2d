//! Render configuration.
//!
//! Defaults reproduce the classic render: a turtle at (200, 200) facing east
//! with its pen up, a 2000x2000 canvas, pen size 3 and a gasket of side 1600
//! written to `Sierpinski.ppm`. A JSON file may override any subset of fields.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::export::ImageFormat;
use crate::fractal::MAX_DEPTH;
use crate::turtle::{BoundaryPolicy, Turtle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub heading: f64,
    pub x: f64,
    pub y: f64,
    pub pen_down: bool,
    pub width: usize,
    pub height: usize,
    pub thickness: u32,
    pub side_length: u32,
    /// Asked for interactively when unset
    pub depth: Option<u32>,
    pub output: PathBuf,
    /// Inferred from the output extension when unset
    pub format: Option<ImageFormat>,
    /// Seed for the edge colors; fresh entropy when unset
    pub seed: Option<u64>,
    pub boundary: BoundaryPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading: 0.0,
            x: 200.0,
            y: 200.0,
            pen_down: false,
            width: 2000,
            height: 2000,
            thickness: 3,
            side_length: 1600,
            depth: None,
            output: PathBuf::from("Sierpinski.ppm"),
            format: None,
            seed: None,
            boundary: BoundaryPolicy::Clip,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config; missing fields keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: RenderConfig = serde_json::from_str(&text)?;
        debug!("loaded render config from {}: {:?}", path.as_ref().display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.thickness == 0 {
            return Err(Error::InvalidConfig("pen thickness must be at least 1".into()));
        }
        if self.side_length == 0 {
            return Err(Error::InvalidConfig("side length must be greater than zero".into()));
        }
        if let Some(depth) = self.depth {
            if depth > MAX_DEPTH {
                return Err(Error::InvalidConfig(format!(
                    "depth {depth} exceeds the maximum of {MAX_DEPTH}"
                )));
            }
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.heading.is_finite() {
            return Err(Error::InvalidConfig("start pose must be finite".into()));
        }
        Ok(())
    }

    pub fn image_format(&self) -> ImageFormat {
        self.format.unwrap_or_else(|| ImageFormat::from_path(&self.output))
    }

    /// Turtle at the configured start pose on a fresh canvas
    pub fn to_turtle(&self) -> Result<Turtle> {
        let turtle = Turtle::new(
            self.heading,
            self.x,
            self.y,
            self.pen_down,
            self.height,
            self.width,
            self.thickness,
        )?;
        Ok(turtle.with_boundary_policy(self.boundary))
    }
}

/// Parse a recursion depth typed by a user. Negative, non-numeric and
/// too-deep values are rejected.
pub fn parse_depth(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let depth: i64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidDepth(format!("{trimmed:?} is not an integer")))?;
    if depth < 0 {
        return Err(Error::InvalidDepth(format!("{depth} is negative")));
    }
    match u32::try_from(depth) {
        Ok(d) if d <= MAX_DEPTH => Ok(d),
        _ => Err(Error::InvalidDepth(format!("{depth} is above the maximum of {MAX_DEPTH}"))),
    }
}
