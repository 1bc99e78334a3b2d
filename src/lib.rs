pub mod error;
pub mod math;
pub mod canvas;
pub mod color;
pub mod turtle;
pub mod fractal;
pub mod export;
pub mod config;
#[cfg(feature = "preview")]
pub mod visualizer;

pub use error::{Error, Result};
pub use math::Pose;
pub use canvas::Canvas;
pub use color::{ColorSource, FixedColor, RandomColors, Rgb};
pub use turtle::{BoundaryPolicy, Command, CommandSink, Turtle, POINTS_PER_LINE};
pub use fractal::{GasketStats, MAX_DEPTH, sierpinski, trace_anchors};
pub use export::{ImageFormat, ppm_header, save, write_ppm};
pub use config::{RenderConfig, parse_depth};
#[cfg(feature = "preview")]
pub use visualizer::show_canvas;
