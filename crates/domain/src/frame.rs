//! Frame: the fixed-size pixel grid handed to a display sink.
//!
//! Pages draw into a [`Frame`] through the `embedded-graphics`
//! [`DrawTarget`] impl; sinks read it back row by row. Out-of-bounds pixels
//! are silently clipped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::error::ValidationError;

/// Colour every frame is cleared to before drawing.
pub const BACKGROUND: Rgb888 = Rgb888::BLACK;

/// Row-major RGB pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Rgb888>,
}

impl Frame {
    /// Allocate a frame filled with [`BACKGROUND`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyFrame`] if either dimension is zero.
    pub fn new(size: Size) -> Result<Self, ValidationError> {
        let (Ok(width), Ok(height)) = (usize::try_from(size.width), usize::try_from(size.height))
        else {
            return Err(ValidationError::EmptyFrame);
        };
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptyFrame);
        }
        Ok(Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Colour at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb888> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Iterate over pixel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb888]> {
        self.pixels.chunks(self.width)
    }

    /// Paint every pixel with `color`.
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Copy `image` onto this frame with its top-left corner at `offset`.
    ///
    /// Black source pixels are transparent.
    pub fn overlay(&mut self, image: &Frame, offset: Point) {
        for (row, line) in image.rows().enumerate() {
            for (col, color) in line.iter().enumerate() {
                if *color == BACKGROUND {
                    continue;
                }
                let (Ok(dx), Ok(dy)) = (i32::try_from(col), i32::try_from(row)) else {
                    continue;
                };
                self.set(offset + Point::new(dx, dy), *color);
            }
        }
    }

    fn set(&mut self, point: Point, color: Rgb888) {
        let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(
            u32::try_from(self.width).unwrap_or(u32::MAX),
            u32::try_from(self.height).unwrap_or(u32::MAX),
        )
    }
}

impl DrawTarget for Frame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}
