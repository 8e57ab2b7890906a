//! Event: a named instant the countdown page counts down to.

use std::sync::Arc;

use chrono::TimeDelta;

use crate::error::{MatrixClockError, ValidationError};
use crate::frame::Frame;
use crate::time::Timestamp;

/// A calendar entry with an optional picture.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub starts_at: Timestamp,
    /// Drawn behind the countdown text; black pixels are transparent.
    pub image: Option<Arc<Frame>>,
}

impl Event {
    /// Create a builder for constructing an [`Event`].
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Whether the event has not started yet at `now`.
    #[must_use]
    pub fn is_upcoming(&self, now: Timestamp) -> bool {
        self.starts_at >= now
    }

    /// Time left until the event starts; negative once it has.
    #[must_use]
    pub fn until(&self, now: Timestamp) -> TimeDelta {
        self.starts_at - now
    }
}

/// Step-by-step builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    name: Option<String>,
    starts_at: Option<Timestamp>,
    image: Option<Arc<Frame>>,
}

impl EventBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn starts_at(mut self, starts_at: Timestamp) -> Self {
        self.starts_at = Some(starts_at);
        self
    }

    #[must_use]
    pub fn image(mut self, image: Arc<Frame>) -> Self {
        self.image = Some(image);
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] if the name is empty or the
    /// start instant is missing.
    pub fn build(self) -> Result<Event, MatrixClockError> {
        let name = self.name.unwrap_or_default();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let starts_at = self
            .starts_at
            .ok_or(ValidationError::MissingCollaborator("event start time"))?;
        Ok(Event {
            name,
            starts_at,
            image: self.image,
        })
    }
}
