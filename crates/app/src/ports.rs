//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the agent layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod calendar;
pub mod probe;
pub mod readers;
pub mod renderer;
pub mod sensors;
pub mod time_source;
pub mod weather;

pub use calendar::Calendar;
pub use probe::Probe;
pub use readers::{DiagnosticsReader, SensorReader, WeatherReader};
pub use renderer::Renderer;
pub use sensors::StateProvider;
pub use time_source::{SystemClock, TimeSource};
pub use weather::WeatherProvider;
