//! Home Assistant adapter error types.

use matrixclock_domain::error::MatrixClockError;

/// Errors specific to the Home Assistant adapter.
#[derive(Debug, thiserror::Error)]
pub enum HomeAssistantError {
    /// Transport failure, timeout or undecodable body.
    #[error("home assistant request failed")]
    Http(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("home assistant API error: {status}")]
    Status { status: u16 },

    /// A domain-level error (malformed timestamp, etc.).
    #[error("domain error")]
    Domain(#[source] MatrixClockError),
}

impl HomeAssistantError {
    /// Convert into a [`MatrixClockError`] for propagation across port
    /// boundaries.
    pub fn into_domain(self) -> MatrixClockError {
        match self {
            Self::Domain(err) => err,
            other => MatrixClockError::external(other),
        }
    }
}

impl From<reqwest::Error> for HomeAssistantError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<HomeAssistantError> for MatrixClockError {
    fn from(err: HomeAssistantError) -> Self {
        err.into_domain()
    }
}
