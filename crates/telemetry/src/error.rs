use thiserror::Error;

/// Errors returned by the logger setup.
#[derive(Error, Debug)]
pub enum TelemetryError {
	#[error("Invalid log level '{0}' (expected trace, debug, info, warn or error)")]
	InvalidLogLevel(String),

	#[error("Logger has not been initialized")]
	NotInitialized,

	#[error("Failed to reload log level: {0}")]
	ReloadFailed(String),

	#[error("Failed to install the global subscriber: {0}")]
	Init(String),
}
