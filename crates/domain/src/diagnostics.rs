//! Network reachability status recorded by the diagnostics agent.

use std::time::Duration;

use chrono::TimeDelta;

use crate::time::Timestamp;

/// Status older than this is considered stale.
pub const STALE_AFTER: TimeDelta = TimeDelta::minutes(5);

const GREEN_MAX: Duration = Duration::from_millis(50);
const YELLOW_MAX: Duration = Duration::from_millis(100);
const ORANGE_MAX: Duration = Duration::from_millis(200);

/// Four-tier latency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

impl PingLevel {
    /// Classify a successful round trip.
    #[must_use]
    pub fn classify(ping: Duration) -> Self {
        if ping <= GREEN_MAX {
            Self::Green
        } else if ping <= YELLOW_MAX {
            Self::Yellow
        } else if ping <= ORANGE_MAX {
            Self::Orange
        } else {
            Self::Red
        }
    }
}

/// Snapshot of the latest probe results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticsStatus {
    /// Instant of the last successful probe.
    pub last_healthy_at: Option<Timestamp>,
    /// Round trip of the last probe; `None` when it failed.
    pub last_ping: Option<Duration>,
    pub last_ping_ok: bool,
    pub last_checked_at: Option<Timestamp>,
}

impl DiagnosticsStatus {
    /// Latency level of the last probe; a failed or missing probe is red.
    #[must_use]
    pub fn ping_level(&self) -> PingLevel {
        match self.last_ping {
            Some(ping) if self.last_ping_ok => PingLevel::classify(ping),
            _ => PingLevel::Red,
        }
    }

    /// No success ever, or none within [`STALE_AFTER`] of `now`.
    #[must_use]
    pub fn is_stale(&self, now: Timestamp) -> bool {
        self.last_healthy_at
            .is_none_or(|healthy| now - healthy > STALE_AFTER)
    }

    /// Record a successful probe taken at `at`.
    pub fn record_success(&mut self, at: Timestamp, ping: Duration) {
        self.last_checked_at = Some(at);
        self.last_healthy_at = Some(at);
        self.last_ping = Some(ping);
        self.last_ping_ok = true;
    }

    /// Record a failed probe taken at `at`; the last healthy instant is kept.
    pub fn record_failure(&mut self, at: Timestamp) {
        self.last_checked_at = Some(at);
        self.last_ping = None;
        self.last_ping_ok = false;
    }
}
