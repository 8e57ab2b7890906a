//! Frame encoders.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use matrixclock_domain::frame::{BACKGROUND, Frame};

const UPPER_HALF_BLOCK: char = '▀';
const RESET: &str = "\x1b[0m";
const LIT: char = '#';
const DARK: char = '.';

/// Encode `frame` as ANSI truecolor text.
///
/// Each line covers two pixel rows: the upper pixel is the foreground of a
/// `▀`, the lower one its background. An odd last row is paired with black.
#[must_use]
pub fn render_ansi(frame: &Frame) -> String {
    let rows: Vec<&[Rgb888]> = frame.rows().collect();
    let mut out = String::with_capacity(frame.width() * rows.len().div_ceil(2) * 40);
    for pair in rows.chunks(2) {
        let upper = pair[0];
        let lower = pair.get(1).copied();
        for (x, top) in upper.iter().enumerate() {
            let bottom = lower.and_then(|row| row.get(x)).copied().unwrap_or(BACKGROUND);
            out.push_str(&format!(
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{UPPER_HALF_BLOCK}",
                top.r(),
                top.g(),
                top.b(),
                bottom.r(),
                bottom.g(),
                bottom.b(),
            ));
        }
        out.push_str(RESET);
        out.push('\n');
    }
    out
}

/// Encode `frame` as `#` for lit pixels and `.` for background, one line per row.
#[must_use]
pub fn render_ascii(frame: &Frame) -> String {
    let mut out = String::with_capacity((frame.width() + 1) * frame.height());
    for row in frame.rows() {
        out.extend(
            row.iter()
                .map(|pixel| if *pixel == BACKGROUND { DARK } else { LIT }),
        );
        out.push('\n');
    }
    out
}
