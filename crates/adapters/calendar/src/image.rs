//! Text-art images.

use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use matrixclock_domain::error::{MatrixClockError, ValidationError};
use matrixclock_domain::frame::Frame;

const LIT: char = '#';

/// Rasterise `rows` into a frame as wide as the longest row.
///
/// Short rows are padded with transparent (black) pixels.
pub(crate) fn rasterize(rows: &[String], color: [u8; 3]) -> Result<Arc<Frame>, MatrixClockError> {
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let size = Size::new(
        u32::try_from(width).map_err(|_| ValidationError::EmptyFrame)?,
        u32::try_from(rows.len()).map_err(|_| ValidationError::EmptyFrame)?,
    );
    let mut frame = Frame::new(size)?;
    let [r, g, b] = color;
    let lit = Rgb888::new(r, g, b);

    let pixels = rows.iter().zip(0_i32..).flat_map(|(row, y)| {
        row.chars()
            .zip(0_i32..)
            .filter(|(cell, _)| *cell == LIT)
            .map(move |(_, x)| Pixel(Point::new(x, y), lit))
    });
    let Ok(()) = frame.draw_iter(pixels);
    Ok(Arc::new(frame))
}
