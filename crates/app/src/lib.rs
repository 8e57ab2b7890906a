//! # matrixclock-app
//!
//! Application layer: background agents, page rotation, frame pacing and
//! **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `WeatherProvider`: two-day forecast lookup
//!   - `StateProvider`: sensor state and area groupings
//!   - `Calendar`: next upcoming event
//!   - `Probe`: network reachability check
//!   - `TimeSource`: local wall-clock time
//! - Define the **Renderer** capability the frame streamer drives
//! - Run the **agents** that keep forecasts, diagnostics and sensor readings
//!   cached without blocking rendering
//! - Compose frames from agent snapshots (`PageController`) and pace them
//!   to a sink (`FrameStreamer`)
//!
//! ## Dependency rule
//! Depends on `matrixclock-domain` only (plus `tokio` and `tokio-util` for
//! tasks, timers and cancellation). Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod agents;
pub mod clock;
pub mod frame_streamer;
pub mod ports;
