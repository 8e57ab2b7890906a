//! Weather provider port: two-day forecast lookup.

use std::future::Future;

use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::weather::TwoDayWeather;

/// Fetches the forecast for today and tomorrow at a location.
///
/// Coordinates are passed through verbatim, as configured.
pub trait WeatherProvider: Send + Sync {
    fn two_day_weather(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> impl Future<Output = Result<TwoDayWeather, MatrixClockError>> + Send;
}

impl<T: WeatherProvider> WeatherProvider for std::sync::Arc<T> {
    fn two_day_weather(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> impl Future<Output = Result<TwoDayWeather, MatrixClockError>> + Send {
        (**self).two_day_weather(latitude, longitude)
    }
}
