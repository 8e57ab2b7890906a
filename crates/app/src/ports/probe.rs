//! Probe port: one network reachability check.

use std::future::Future;
use std::time::Duration;

use matrixclock_domain::error::MatrixClockError;

/// A single reachability check returning the measured round trip.
pub trait Probe: Send + Sync {
    fn probe(&self) -> impl Future<Output = Result<Duration, MatrixClockError>> + Send;
}
