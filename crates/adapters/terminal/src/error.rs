//! Terminal sink error types.

use matrixclock_domain::error::MatrixClockError;

/// Errors specific to the terminal sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the output failed (closed pipe, full disk).
    #[error("failed to write frame")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    /// Convert into a [`MatrixClockError::External`].
    pub fn into_domain(self) -> MatrixClockError {
        MatrixClockError::external(self)
    }
}

impl From<SinkError> for MatrixClockError {
    fn from(err: SinkError) -> Self {
        err.into_domain()
    }
}
