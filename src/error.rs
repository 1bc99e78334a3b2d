//! Error types for turtle rendering

use thiserror::Error;

/// Result type alias for drawing and export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while drawing or exporting
#[derive(Error, Debug)]
pub enum Error {
    /// Canvas with a zero side
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Start position or heading that is NaN or infinite
    #[error("Invalid turtle pose: ({x}, {y}) heading {heading}")]
    InvalidPose { x: f64, y: f64, heading: f64 },

    /// Pen thickness must be at least one pixel
    #[error("Invalid pen thickness: {0}")]
    InvalidThickness(u32),

    /// Gasket side length must be positive
    #[error("Side length must be greater than zero")]
    InvalidSideLength,

    /// Depth input that is not a non-negative integer
    #[error("Invalid recursion depth: {0}")]
    InvalidDepth(String),

    /// Depth past the point where triangles are sub-pixel
    #[error("Recursion depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },

    /// Invalid render configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel write outside the canvas under the strict boundary policy
    #[error("Pixel write at row {row}, column {col} is outside the {width}x{height} canvas")]
    OutOfBounds {
        row: i64,
        col: i64,
        width: usize,
        height: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Preview window failure
    #[cfg(feature = "preview")]
    #[error("Preview window failed: {0}")]
    Preview(String),
}
