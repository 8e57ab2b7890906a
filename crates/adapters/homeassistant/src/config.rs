//! Home Assistant connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the Home Assistant client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeAssistantConfig {
    /// Base URL of the instance, e.g. `http://homeassistant.local:8123`.
    pub base_url: String,
    /// Long-lived access token.
    pub token: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl HomeAssistantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HomeAssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "http://homeassistant.local:8123".to_string(),
            token: String::new(),
            timeout_secs: 10,
        }
    }
}
