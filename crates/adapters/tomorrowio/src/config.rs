//! tomorrow.io client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default forecast endpoint.
pub const FORECAST_URL: &str = "https://api.tomorrow.io/v4/weather/forecast";

/// Configuration for the tomorrow.io client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TomorrowIoConfig {
    /// API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Forecast endpoint, overridable for testing.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl TomorrowIoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TomorrowIoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: FORECAST_URL.to_string(),
            timeout_secs: 10,
        }
    }
}
