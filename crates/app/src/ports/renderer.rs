//! Renderer port: draws one frame into a caller-provided buffer.

use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::frame::Frame;

/// Anything that can paint a complete frame.
///
/// The frame streamer clears the buffer before each call. An error ends
/// the stream.
pub trait Renderer: Send + Sync {
    /// Draw into `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when the frame cannot be produced at all.
    fn draw_frame(&self, target: &mut Frame) -> Result<(), MatrixClockError>;
}

impl<T: Renderer + ?Sized> Renderer for std::sync::Arc<T> {
    fn draw_frame(&self, target: &mut Frame) -> Result<(), MatrixClockError> {
        (**self).draw_frame(target)
    }
}
