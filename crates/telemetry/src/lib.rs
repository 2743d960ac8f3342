//! Logging setup for applications and tests that use the RESP client.
//!
//! The client crates only emit `tracing` events; installing a subscriber is
//! left to the embedding application, which can use [`init`] for a console
//! logger with a runtime-adjustable level.

mod error;
pub mod logger;

pub use error::TelemetryError;
pub use logger::init;
pub use logger::init_for_tests;
pub use logger::reload_log_level;
