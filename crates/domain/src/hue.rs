//! Hue gradient: stable, evenly spaced colours for ordered lists.
//!
//! Hues walk the OKLCH wheel at fixed lightness and chroma, so neighbouring
//! rows stay distinguishable while sharing the same perceived brightness.

use embedded_graphics::pixelcolor::Rgb888;
use palette::{Clamp, FromColor, Oklch, Srgb};

/// OKLCH lightness shared by every gradient colour.
pub const LIGHTNESS: f64 = 0.75;
/// OKLCH chroma shared by every gradient colour.
pub const CHROMA: f64 = 0.12;

/// Deterministic colour generator keyed by item index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueGradient {
    /// Hue of index 0, in degrees.
    pub base_hue: f64,
    /// Degrees added per index.
    pub step: f64,
}

impl HueGradient {
    /// Gradient used for sensor rows on area pages.
    pub const SENSORS: Self = Self {
        base_hue: 60.0,
        step: 50.0,
    };

    #[must_use]
    pub const fn new(base_hue: f64, step: f64) -> Self {
        Self { base_hue, step }
    }

    /// Colour of the item at `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn color(&self, index: usize) -> Rgb888 {
        let hue = (self.base_hue + index as f64 * self.step).rem_euclid(360.0);
        oklch_to_rgb(LIGHTNESS, CHROMA, hue)
    }
}

fn oklch_to_rgb(lightness: f64, chroma: f64, hue_degrees: f64) -> Rgb888 {
    let rgb: Srgb<f64> = Srgb::from_color(Oklch::new(lightness, chroma, hue_degrees));
    let rgb: Srgb<u8> = rgb.clamp().into_format();
    Rgb888::new(rgb.red, rgb.green, rgb.blue)
}
