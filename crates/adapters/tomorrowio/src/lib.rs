//! tomorrow.io adapter for matrixclock.
//!
//! Implements the [`WeatherProvider`](matrixclock_app::ports::WeatherProvider)
//! port on top of the tomorrow.io v4 forecast endpoint.
//!
//! ## Responsibilities
//!
//! - Build the daily forecast request for a coordinate pair
//! - Turn non-success responses into typed errors, surfacing the API message
//! - Map the first two daily timelines onto [`TwoDayWeather`](matrixclock_domain::weather::TwoDayWeather)
//!
//! ## Dependency rule
//!
//! Depends on `matrixclock-domain` and `matrixclock-app` (for port traits).

mod client;
pub mod config;
pub mod error;
mod types;

pub use client::TomorrowIoClient;
pub use config::TomorrowIoConfig;
pub use error::TomorrowIoError;
