use minifb::{Key, Window, WindowOptions};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

/// Largest window side before the canvas is shrunk to fit
const MAX_WINDOW: usize = 1000;

/// Integer shrink factor that fits `width x height` inside `MAX_WINDOW`
fn scale_factor(width: usize, height: usize) -> usize {
    width.max(height).div_ceil(MAX_WINDOW).max(1)
}

/// Nearest-neighbour shrink of the canvas by `factor`
fn downsample(canvas: &Canvas, factor: usize) -> (Vec<u32>, usize, usize) {
    let full = canvas.to_u32_buffer();
    if factor == 1 {
        return (full, canvas.width(), canvas.height());
    }
    let w = (canvas.width() / factor).max(1);
    let h = (canvas.height() / factor).max(1);
    let mut buffer = vec![0u32; w * h];
    for y in 0..h {
        let src_y = (y * factor).min(canvas.height() - 1);
        for x in 0..w {
            let src_x = (x * factor).min(canvas.width() - 1);
            buffer[y * w + x] = full[src_y * canvas.width() + src_x];
        }
    }
    (buffer, w, h)
}

/// Show the canvas in a window until it is closed or Escape is pressed
pub fn show_canvas(canvas: &Canvas, title: &str) -> Result<()> {
    let (buffer, w, h) = downsample(canvas, scale_factor(canvas.width(), canvas.height()));

    let mut window = Window::new(title, w, h, WindowOptions::default())
        .map_err(|e| Error::Preview(e.to_string()))?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, w, h)
            .map_err(|e| Error::Preview(e.to_string()))?;
    }
    Ok(())
}
