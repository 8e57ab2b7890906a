//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MatrixClockError`] via `#[from]` or an explicit `into_domain()`.

/// Top-level error shared by ports, agents and the renderer.
#[derive(Debug, thiserror::Error)]
pub enum MatrixClockError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("render error")]
    Render(#[from] RenderError),

    /// Failure reported by an external collaborator (HTTP backend, sink, probe).
    #[error("external error")]
    External(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl MatrixClockError {
    /// Wrap any error raised outside the domain.
    pub fn external(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::External(Box::new(err))
    }
}

/// Invariant violations detected at construction or ingestion time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one sensor entity id must be configured")]
    EmptyEntityList,

    #[error("{interval} interval must be strictly positive")]
    NonPositiveInterval { interval: &'static str },

    #[error("malformed timestamp {value:?}")]
    MalformedTimestamp { value: String },

    #[error("name must not be empty")]
    EmptyName,

    #[error("frame dimensions must be non-zero")]
    EmptyFrame,

    #[error("missing {0}")]
    MissingCollaborator(&'static str),
}

/// Lookup for an item that does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {key:?} not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub key: String,
}

/// Failures raised while drawing a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("frame is {actual_width}x{actual_height}, at least {min_width}x{min_height} required")]
    FrameTooSmall {
        actual_width: u32,
        actual_height: u32,
        min_width: u32,
        min_height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_domain_error() {
        let err: MatrixClockError = ValidationError::EmptyEntityList.into();
        assert!(matches!(
            err,
            MatrixClockError::Validation(ValidationError::EmptyEntityList)
        ));
    }

    #[test]
    fn should_name_interval_in_message() {
        let err = ValidationError::NonPositiveInterval { interval: "weather refresh" };
        assert_eq!(
            err.to_string(),
            "weather refresh interval must be strictly positive"
        );
    }

    #[test]
    fn should_keep_external_source() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "probe timed out");
        let err = MatrixClockError::external(io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "probe timed out");
    }
}
