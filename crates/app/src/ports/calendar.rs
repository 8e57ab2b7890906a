//! Calendar port: "what is coming up next".

use matrixclock_domain::event::Event;
use matrixclock_domain::time::Timestamp;

/// Answers the single question the countdown page asks.
pub trait Calendar: Send + Sync {
    /// First event, in chronological order, starting at or after `now`.
    fn next_upcoming(&self, now: Timestamp) -> Option<Event>;
}
