//! Background agents: periodically refreshed, lock-protected caches.
//!
//! Each agent owns one cache behind its own `RwLock`. Readers get owned
//! snapshots and never wait on IO; refresh tasks hold the write lock only
//! for the in-memory swap. Every refresh loop stops when its
//! [`CancellationToken`](tokio_util::sync::CancellationToken) is cancelled.

pub mod diagnostics;
pub mod sensors;
pub mod weather;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use matrixclock_domain::error::ValidationError;
use tokio::time::{Instant, Interval, MissedTickBehavior};

pub use diagnostics::{DiagnosticsAgent, TcpProbe};
pub use sensors::SensorAgent;
pub use weather::{WeatherAgent, WeatherOptions};

pub(crate) fn ensure_positive(
    interval: Duration,
    name: &'static str,
) -> Result<(), ValidationError> {
    if interval.is_zero() {
        return Err(ValidationError::NonPositiveInterval { interval: name });
    }
    Ok(())
}

/// Interval whose first tick is one full `period` away. Ticks missed while
/// the owner was busy are skipped, never replayed.
pub(crate) fn ticker(period: Duration) -> Interval {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

// Caches are replaced wholesale, so a poisoned lock still holds a
// consistent value.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
