//! Diagnostics agent: periodic network reachability probe.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use matrixclock_domain::diagnostics::DiagnosticsStatus;
use matrixclock_domain::error::MatrixClockError;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::ports::{DiagnosticsReader, Probe};

/// How often the network is probed.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(120);
/// Well-known endpoint probed by default (a public DNS resolver).
pub const PROBE_ADDRESS: &str = "8.8.8.8:53";
/// Connection attempts slower than this count as failures.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Measures how long a TCP handshake with `address` takes. No payload is sent.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    address: String,
    timeout: Duration,
}

impl TcpProbe {
    #[must_use]
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(PROBE_ADDRESS, PROBE_TIMEOUT)
    }
}

impl Probe for TcpProbe {
    async fn probe(&self) -> Result<Duration, MatrixClockError> {
        let started = tokio::time::Instant::now();
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.address.as_str()))
            .await
            .map_err(MatrixClockError::external)?
            .map_err(MatrixClockError::external)?;
        let elapsed = started.elapsed();
        drop(stream);
        Ok(elapsed)
    }
}

/// Reachability status cache fed by a [`Probe`].
pub struct DiagnosticsAgent<P = TcpProbe> {
    probe: P,
    interval: Duration,
    status: RwLock<DiagnosticsStatus>,
}

impl<P: Probe> DiagnosticsAgent<P> {
    /// Create an agent with an empty status; nothing is probed until
    /// [`spawn_probing`](Self::spawn_probing) or [`check_once`](Self::check_once).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] for a zero interval.
    pub fn new(probe: P, interval: Duration) -> Result<Arc<Self>, MatrixClockError> {
        super::ensure_positive(interval, "diagnostics probe")?;
        Ok(Arc::new(Self {
            probe,
            interval,
            status: RwLock::new(DiagnosticsStatus::default()),
        }))
    }

    /// Run one probe and record its outcome. Failures are part of the status,
    /// not errors.
    pub async fn check_once(&self) {
        let result = self.probe.probe().await;
        let checked_at = matrixclock_domain::time::now();
        let mut status = super::write(&self.status);
        match result {
            Ok(ping) => {
                status.record_success(checked_at, ping);
                tracing::debug!(ping_ms = ping.as_millis(), "network probe succeeded");
            }
            Err(err) => {
                status.record_failure(checked_at);
                tracing::warn!(%err, "network probe failed");
            }
        }
    }
}

impl<P: Probe + 'static> DiagnosticsAgent<P> {
    /// Spawn the probe loop. The first probe runs immediately.
    pub fn spawn_probing(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let agent = Arc::clone(self);
        tokio::spawn(async move { agent.run(cancel).await })
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => self.check_once().await,
            }
        }
        tracing::debug!("diagnostics agent stopped");
    }
}

impl<P: Send + Sync> DiagnosticsReader for DiagnosticsAgent<P> {
    fn status(&self) -> DiagnosticsStatus {
        super::read(&self.status).clone()
    }
}
