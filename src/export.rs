// Canvas export: binary PPM (P6) written by hand, PNG through the image crate

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::RgbImage;
use log::info;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

pub const MAX_COLOR: u8 = 255;

/// Output file format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Binary PPM, `P6` header followed by raw RGB rows
    Ppm,
    Png,
}

impl ImageFormat {
    /// `.png` selects PNG, anything else PPM
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => ImageFormat::Png,
            _ => ImageFormat::Ppm,
        }
    }
}

pub fn ppm_header(width: usize, height: usize) -> String {
    format!("P6\n{} {} {}\n", width, height, MAX_COLOR)
}

/// Write the canvas as a P6 image: header, then `width * height * 3` bytes
pub fn write_ppm<W: Write>(canvas: &Canvas, mut out: W) -> Result<()> {
    out.write_all(ppm_header(canvas.width(), canvas.height()).as_bytes())?;
    out.write_all(canvas.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Save the canvas to `path` in the requested format
pub fn save<P: AsRef<Path>>(canvas: &Canvas, path: P, format: ImageFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        ImageFormat::Ppm => {
            let file = File::create(path)?;
            write_ppm(canvas, BufWriter::new(file))?;
        }
        ImageFormat::Png => {
            let rgb = RgbImage::from_raw(
                canvas.width() as u32,
                canvas.height() as u32,
                canvas.as_bytes().to_vec(),
            )
            .ok_or(Error::InvalidDimensions {
                width: canvas.width(),
                height: canvas.height(),
            })?;
            rgb.save_with_format(path, image::ImageFormat::Png)?;
        }
    }
    info!(
        "wrote {}x{} {:?} image to {}",
        canvas.width(),
        canvas.height(),
        format,
        path.display()
    );
    Ok(())
}
