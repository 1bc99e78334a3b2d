//! Owned RGB pixel buffer the turtle draws into.
//!
//! Rows are stored top row first, three bytes per pixel. The buffer length is
//! fixed at `width * height * 3` when the canvas is created.

use crate::color::Rgb;
use crate::error::{Error, Result};

pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Canvas {
    /// White canvas of the given size
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::InvalidDimensions { width, height })?;
        Ok(Canvas {
            width,
            height,
            data: vec![255; size],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes, top row first
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, row: i64, col: i64) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some((row * self.width + col) * BYTES_PER_PIXEL)
    }

    /// Write one pixel in buffer coordinates. Returns `false` and leaves the
    /// buffer untouched when the pixel lies outside the canvas.
    pub fn put(&mut self, row: i64, col: i64, color: Rgb) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.data[i] = color.r;
                self.data[i + 1] = color.g;
                self.data[i + 2] = color.b;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        let i = self.offset(row as i64, col as i64)?;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Every pixel that is not pure white, as `(row, col, color)`
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .enumerate()
            .filter(|(_, px)| px.iter().any(|&b| b != 255))
            .map(|(i, px)| (i / self.width, i % self.width, Rgb::new(px[0], px[1], px[2])))
    }

    /// Pixels in `0RGB` form, row by row
    pub fn to_u32_buffer(&self) -> Vec<u32> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| Rgb::new(px[0], px[1], px[2]).to_u32())
            .collect()
    }
}
