//! Home Assistant adapter for matrixclock.
//!
//! Implements the [`StateProvider`](matrixclock_app::ports::StateProvider)
//! port against the Home Assistant REST API using a long-lived access token.
//!
//! ## Responsibilities
//!
//! - Fetch single entity states from `/api/states/{entity_id}`
//! - Render a Jinja template through `/api/template` to list sensors per area
//! - Convert response bodies into domain snapshots with typed attributes
//!
//! ## Dependency rule
//!
//! Depends on `matrixclock-domain` and `matrixclock-app` (for port traits).

mod client;
pub mod config;
pub mod error;
mod types;

pub use client::HomeAssistantClient;
pub use config::HomeAssistantConfig;
pub use error::HomeAssistantError;
