//! # matrixclock-domain
//!
//! Pure domain model for the matrixclock pixel display.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, duration formatting
//! - Define the **Frame** (the pixel grid handed to a display sink)
//! - Define **forecasts**, **diagnostics status** and **sensor readings** as
//!   captured by the background agents
//! - Define **Events** (countdown targets) and **Pages** (rotation set)
//! - Provide the hue gradient used to colour ordered lists
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod diagnostics;
pub mod event;
pub mod frame;
pub mod hue;
pub mod page;
pub mod sensor;
pub mod weather;
