//! Snapshot readers: the read side of each agent, as seen by page rendering.
//!
//! Every method returns an owned copy of cached data and never performs IO,
//! so a frame can be drawn without waiting on any backend.

use matrixclock_domain::diagnostics::DiagnosticsStatus;
use matrixclock_domain::sensor::{AreaSensors, SensorState};
use matrixclock_domain::weather::DayWeather;

/// Cached forecast access.
pub trait WeatherReader: Send + Sync {
    fn today(&self) -> DayWeather;
    fn tomorrow(&self) -> DayWeather;
}

/// Cached reachability status access.
pub trait DiagnosticsReader: Send + Sync {
    fn status(&self) -> DiagnosticsStatus;
}

/// Cached sensor readings access.
pub trait SensorReader: Send + Sync {
    /// Names of the areas holding configured sensors, in discovery order.
    fn area_names(&self) -> Vec<String>;
    fn areas(&self) -> Vec<AreaSensors>;
    fn area(&self, name: &str) -> Option<AreaSensors>;
    fn sensor(&self, entity_id: &str) -> Option<SensorState>;
    /// Every cached sensor, ordered by entity id.
    fn all_sensors(&self) -> Vec<SensorState>;
}
