//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `matrixclock.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use matrixclock_adapter_calendar::CalendarConfig;
use matrixclock_adapter_homeassistant::HomeAssistantConfig;
use matrixclock_adapter_terminal::SinkStyle;
use matrixclock_adapter_tomorrowio::TomorrowIoConfig;
use matrixclock_adapter_tomorrowio::config::FORECAST_URL;
use matrixclock_app::agents::WeatherOptions;
use matrixclock_app::agents::diagnostics::{PROBE_ADDRESS, PROBE_INTERVAL, PROBE_TIMEOUT};
use matrixclock_app::agents::sensors::DEFAULT_REFRESH;
use matrixclock_app::clock::{ClockOptions, ROTATION_INTERVAL};
use serde::Deserialize;

const HA_TIMEOUT_SECS: u64 = 10;
/// Largest accepted panel side, in pixels.
const MAX_DIMENSION: u32 = 1024;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Panel geometry and pacing.
    pub display: DisplayConfig,
    /// tomorrow.io forecast settings.
    pub weather: WeatherConfig,
    /// Connectivity probe settings.
    pub diagnostics: DiagnosticsConfig,
    /// Home Assistant sensors; absent disables the area pages.
    pub home_assistant: Option<HomeAssistantSection>,
    /// Countdown events.
    pub calendar: CalendarConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Panel geometry, frame pacing and page rotation.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub rows: u32,
    pub cols: u32,
    pub frame_interval_ms: u64,
    pub rotation_interval_secs: u64,
    /// Keep drawing pages overnight.
    pub debug: bool,
    pub style: SinkStyle,
}

/// Forecast location and refresh cadence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: String,
    pub latitude: String,
    pub longitude: String,
    pub refresh_secs: u64,
    pub base_url: String,
}

/// Reachability probe target and cadence.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// `host:port` to open a TCP connection to.
    pub address: String,
    pub timeout_ms: u64,
    pub interval_secs: u64,
}

/// Home Assistant connection and the sensors to display.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HomeAssistantSection {
    pub base_url: String,
    pub token: String,
    pub entity_ids: Vec<String>,
    pub refresh_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `matrixclock.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("matrixclock.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LED_ROWS")
            && let Ok(rows) = val.parse()
        {
            self.display.rows = rows;
        }
        if let Some(val) = var("LED_COLS")
            && let Ok(cols) = val.parse()
        {
            self.display.cols = cols;
        }
        if let Some(val) = var("LED_FRAME_INTERVAL_MS")
            && let Ok(ms) = val.parse()
        {
            self.display.frame_interval_ms = ms;
        }
        if let Some(val) = var("MATRIXCLOCK_DEBUG") {
            self.display.debug = matches!(val.trim(), "1" | "true" | "yes");
        }
        if let Some(val) = var("WEATHER_API_KEY") {
            self.weather.api_key = val;
        }
        if let Some(val) = var("WEATHER_LATITUDE") {
            self.weather.latitude = val;
        }
        if let Some(val) = var("WEATHER_LONGITUDE") {
            self.weather.longitude = val;
        }
        if let Some(val) = var("WEATHER_REFRESH")
            && let Ok(secs) = val.parse()
        {
            self.weather.refresh_secs = secs;
        }
        if let Some(val) = var("HA_SENSORS") {
            let section = self.home_assistant.get_or_insert_with(Default::default);
            section.entity_ids = val
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(section) = self.home_assistant.as_mut() {
            if let Some(val) = var("HA_BASE_URL") {
                section.base_url = val;
            }
            if let Some(val) = var("HA_TOKEN") {
                section.token = val;
            }
        }
        if let Some(val) = var("MATRIXCLOCK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.rows == 0 || self.display.cols == 0 {
            return Err(ConfigError::Validation(
                "display rows and cols must be non-zero".to_string(),
            ));
        }
        if self.display.rows > MAX_DIMENSION || self.display.cols > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "display rows and cols must not exceed {MAX_DIMENSION}"
            )));
        }
        let intervals = [
            ("display.frame_interval_ms", self.display.frame_interval_ms),
            ("display.rotation_interval_secs", self.display.rotation_interval_secs),
            ("weather.refresh_secs", self.weather.refresh_secs),
            ("diagnostics.interval_secs", self.diagnostics.interval_secs),
            ("diagnostics.timeout_ms", self.diagnostics.timeout_ms),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Validation(format!("{name} must be non-zero")));
        }
        if let Some(section) = &self.home_assistant {
            if section.refresh_secs == 0 {
                return Err(ConfigError::Validation(
                    "home_assistant.refresh_secs must be non-zero".to_string(),
                ));
            }
            if section.entity_ids.is_empty() {
                return Err(ConfigError::Validation(
                    "home_assistant.entity_ids must list at least one sensor".to_string(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.display.frame_interval_ms)
    }

    #[must_use]
    pub fn clock_options(&self) -> ClockOptions {
        ClockOptions {
            rotation_interval: Duration::from_secs(self.display.rotation_interval_secs),
            debug: self.display.debug,
        }
    }

    #[must_use]
    pub fn tomorrowio(&self) -> TomorrowIoConfig {
        TomorrowIoConfig {
            api_key: self.weather.api_key.clone(),
            base_url: self.weather.base_url.clone(),
            ..TomorrowIoConfig::default()
        }
    }

    #[must_use]
    pub fn weather_options(&self) -> WeatherOptions {
        WeatherOptions {
            latitude: self.weather.latitude.clone(),
            longitude: self.weather.longitude.clone(),
            refresh: Duration::from_secs(self.weather.refresh_secs),
        }
    }
}

impl DiagnosticsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl HomeAssistantSection {
    #[must_use]
    pub fn client_config(&self) -> HomeAssistantConfig {
        HomeAssistantConfig {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            timeout_secs: HA_TIMEOUT_SECS,
        }
    }

    #[must_use]
    pub fn refresh(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 64,
            frame_interval_ms: 1000,
            rotation_interval_secs: ROTATION_INTERVAL.as_secs(),
            debug: false,
            style: SinkStyle::Ansi,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            refresh_secs: 900,
            base_url: FORECAST_URL.to_string(),
        }
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            address: PROBE_ADDRESS.to_string(),
            timeout_ms: u64::try_from(PROBE_TIMEOUT.as_millis()).unwrap_or(u64::MAX),
            interval_secs: PROBE_INTERVAL.as_secs(),
        }
    }
}

impl Default for HomeAssistantSection {
    fn default() -> Self {
        let defaults = HomeAssistantConfig::default();
        Self {
            base_url: defaults.base_url,
            token: defaults.token,
            entity_ids: Vec::new(),
            refresh_secs: DEFAULT_REFRESH.as_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "matrixclockd=info,matrixclock=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
