//! tomorrow.io adapter error types.

use matrixclock_domain::error::MatrixClockError;

/// Errors specific to the tomorrow.io adapter.
#[derive(Debug, thiserror::Error)]
pub enum TomorrowIoError {
    /// Transport failure, timeout or undecodable body.
    #[error("tomorrow.io request failed")]
    Http(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("tomorrow.io returned {status}: {}", message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// Fewer than two daily timelines in the forecast.
    #[error("forecast holds {count} daily entries, two required")]
    MissingDays { count: usize },
}

impl TomorrowIoError {
    /// Convert into a [`MatrixClockError::External`] for propagation across
    /// port boundaries.
    pub fn into_domain(self) -> MatrixClockError {
        MatrixClockError::external(self)
    }
}

impl From<reqwest::Error> for TomorrowIoError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<TomorrowIoError> for MatrixClockError {
    fn from(err: TomorrowIoError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_api_message() {
        let err = TomorrowIoError::Status {
            status: 401,
            message: Some("The method requires authentication".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "tomorrow.io returned 401: The method requires authentication"
        );
    }

    #[test]
    fn should_display_status_without_message() {
        let err = TomorrowIoError::Status {
            status: 503,
            message: None,
        };
        assert_eq!(err.to_string(), "tomorrow.io returned 503: no details");
    }

    #[test]
    fn should_convert_into_external_domain_error() {
        let err: MatrixClockError = TomorrowIoError::MissingDays { count: 1 }.into();
        assert!(matches!(err, MatrixClockError::External(_)));
    }
}
