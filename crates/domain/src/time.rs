//! Time and timestamp helpers.

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for `last_updated`, probe instants, event times, etc.
pub type Timestamp = DateTime<Utc>;

/// Local hour at which the display goes quiet.
pub const OVERNIGHT_START_HOUR: u32 = 20;
/// Local hour at which page content comes back.
pub const OVERNIGHT_END_HOUR: u32 = 6;

/// `strftime` pattern of the persistent header, e.g. `19:59 Sat Oct 17`.
pub const HEADER_FORMAT: &str = "%H:%M %a %b %-d";

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedTimestamp`] for anything that is not
/// a complete RFC 3339 date-time (for example a missing `T` separator).
pub fn parse_timestamp(value: &str) -> Result<Timestamp, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ValidationError::MalformedTimestamp {
            value: value.to_string(),
        })
}

/// Whether a local wall-clock time falls in `[20:00, 06:00)`.
#[must_use]
pub fn is_overnight(time: NaiveTime) -> bool {
    let hour = time.hour();
    hour >= OVERNIGHT_START_HOUR || hour < OVERNIGHT_END_HOUR
}

/// Format the header clock line in the offset carried by `time`.
#[must_use]
pub fn format_header<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(HEADER_FORMAT).to_string()
}

/// Format the time left before an event.
///
/// At least one day left, once rounded to the second, gives `DDd HHh MMm`
/// rounded to the minute. Anything shorter gives `HHh MMm SSs` rounded to
/// the second. Elapsed durations are shown as zero.
#[must_use]
pub fn format_countdown(remaining: TimeDelta) -> String {
    let remaining = remaining.max(TimeDelta::zero());
    let seconds = round_to_units(remaining, 1);
    if seconds >= 86_400 {
        let minutes = round_to_units(remaining, 60);
        format!(
            "{:02}d {:02}h {:02}m",
            minutes / 1440,
            minutes % 1440 / 60,
            minutes % 60
        )
    } else {
        format!(
            "{:02}h {:02}m {:02}s",
            seconds / 3600,
            seconds % 3600 / 60,
            seconds % 60
        )
    }
}

/// Format how long ago something happened, in a compact form: `7m`,
/// `3h05m` or `2d04h`. Negative ages clamp to `0m`.
#[must_use]
pub fn format_age(age: TimeDelta) -> String {
    let minutes = round_to_units(age.max(TimeDelta::zero()), 60);
    if minutes < 60 {
        format!("{minutes}m")
    } else if minutes < 1440 {
        format!("{}h{:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}d{:02}h", minutes / 1440, minutes % 1440 / 60)
    }
}

/// Round a non-negative delta to the nearest multiple of `unit_secs`,
/// halves rounding up.
fn round_to_units(delta: TimeDelta, unit_secs: i64) -> i64 {
    let unit_ms = unit_secs * 1000;
    (delta.num_milliseconds() + unit_ms / 2) / unit_ms
}
