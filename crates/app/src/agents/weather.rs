//! Weather agent: keeps the latest two-day forecast cached.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::weather::{DayWeather, TwoDayWeather};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::{WeatherProvider, WeatherReader};

/// Upper bound for the fetch performed during construction.
pub const INITIAL_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where and how often to fetch the forecast.
#[derive(Debug, Clone)]
pub struct WeatherOptions {
    pub latitude: String,
    pub longitude: String,
    pub refresh: Duration,
}

/// Forecast cache fed by a [`WeatherProvider`].
pub struct WeatherAgent<P> {
    provider: P,
    options: WeatherOptions,
    cache: RwLock<TwoDayWeather>,
}

impl<P: WeatherProvider> WeatherAgent<P> {
    /// Validate `options` and fetch the first forecast.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] for a zero refresh interval,
    /// or the provider error (or a timeout) if the first fetch fails. The
    /// agent is unusable without an initial forecast.
    pub async fn new(provider: P, options: WeatherOptions) -> Result<Arc<Self>, MatrixClockError> {
        super::ensure_positive(options.refresh, "weather refresh")?;

        let initial = tokio::time::timeout(
            INITIAL_FETCH_TIMEOUT,
            provider.two_day_weather(&options.latitude, &options.longitude),
        )
        .await
        .map_err(MatrixClockError::external)??;
        tracing::info!(
            latitude = %options.latitude,
            longitude = %options.longitude,
            refresh_secs = options.refresh.as_secs(),
            "weather forecast cached"
        );

        Ok(Arc::new(Self {
            provider,
            options,
            cache: RwLock::new(initial),
        }))
    }

    /// Fetch a new forecast and swap it in.
    ///
    /// # Errors
    ///
    /// Returns the provider error; the cached forecast is left untouched.
    pub async fn refresh(&self) -> Result<(), MatrixClockError> {
        let forecast = self
            .provider
            .two_day_weather(&self.options.latitude, &self.options.longitude)
            .await?;
        *super::write(&self.cache) = forecast;
        tracing::debug!("weather forecast refreshed");
        Ok(())
    }

    /// Copy of the whole cached forecast.
    #[must_use]
    pub fn snapshot(&self) -> TwoDayWeather {
        super::read(&self.cache).clone()
    }
}

impl<P: WeatherProvider + 'static> WeatherAgent<P> {
    /// Spawn the periodic refresh loop.
    pub fn spawn_refresh(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let agent = Arc::clone(self);
        tokio::spawn(async move { agent.run(cancel).await })
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut ticker = super::ticker(self.options.refresh);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(err) = self.refresh().await {
                        tracing::warn!(%err, "weather refresh failed, keeping previous forecast");
                    }
                }
            }
        }
        tracing::debug!("weather agent stopped");
    }
}

impl<P: Send + Sync> WeatherReader for WeatherAgent<P> {
    fn today(&self) -> DayWeather {
        super::read(&self.cache).today.clone()
    }

    fn tomorrow(&self) -> DayWeather {
        super::read(&self.cache).tomorrow.clone()
    }
}
