//! Time source port: local wall-clock time for the header and overnight window.

use chrono::{DateTime, FixedOffset, Local};

/// Provides the current local time.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the host clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
