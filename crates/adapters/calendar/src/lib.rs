//! Static calendar adapter for matrixclock.
//!
//! Implements the [`Calendar`](matrixclock_app::ports::Calendar) port from a
//! list of events declared in configuration.
//!
//! ## Responsibilities
//!
//! - Validate configured events (non-empty name, RFC 3339 start instant)
//! - Rasterise optional text-art images into frames
//! - Answer "next upcoming event" over a chronologically sorted list
//!
//! ## Dependency rule
//!
//! Depends on `matrixclock-domain` and `matrixclock-app` (for port traits).

pub mod config;
mod image;

use matrixclock_app::ports::Calendar;
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::event::Event;
use matrixclock_domain::time::{Timestamp, parse_timestamp};

pub use config::{CalendarConfig, EventConfig};

/// In-memory calendar, sorted by start instant.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    events: Vec<Event>,
}

impl StaticCalendar {
    /// Wrap already-built events.
    #[must_use]
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|event| event.starts_at);
        Self { events }
    }

    /// Build every configured event.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] for the first event with an
    /// empty name, a malformed timestamp or an empty image.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, MatrixClockError> {
        let events = config
            .events
            .iter()
            .map(build_event)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = events.len(), "loaded calendar events");
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

fn build_event(config: &EventConfig) -> Result<Event, MatrixClockError> {
    let mut builder = Event::builder()
        .name(config.name.as_str())
        .starts_at(parse_timestamp(&config.starts_at)?);
    if let Some(rows) = &config.image {
        builder = builder.image(image::rasterize(rows, config.image_color)?);
    }
    builder.build()
}

impl Calendar for StaticCalendar {
    fn next_upcoming(&self, now: Timestamp) -> Option<Event> {
        self.events
            .iter()
            .find(|event| event.is_upcoming(now))
            .cloned()
    }
}
