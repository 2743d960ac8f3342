use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let datetime = chrono::Local::now();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

/// Install a console logger as the global subscriber.
///
/// Output carries timestamps, thread ids and the event target, so records
/// from the codec (`resp`) and the session (`client`) can be told apart.
/// The level can be changed later with [`reload_log_level`].
///
/// # Errors
///
/// Fails if `level` is not one of trace, debug, info, warn, error, or if a
/// global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// telemetry::init("debug")?;
/// tracing::info!("client starting");
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let level = validate_level(level)?;

	let (filter_layer, reload_handle) = reload::Layer::new(EnvFilter::new(&level));

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_timer(CustomTimeFormat)
				.with_target(true)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::Init(e.to_string()))?;

	let _ = RELOAD_HANDLE.set(reload_handle);
	Ok(())
}

/// Route log output through the test harness.
///
/// Honors `RUST_LOG` and falls back to `debug`. Safe to call from every
/// test; only the first call installs the subscriber.
pub fn init_for_tests() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

	let _ = tracing_subscriber::registry()
		.with(env_filter)
		.with(
			fmt::layer()
				.with_test_writer()
				.with_timer(CustomTimeFormat)
				.with_target(true),
		)
		.try_init();
}

/// Reload the log level dynamically
///
/// # Errors
///
/// Returns an error if:
/// - The provided log level is invalid
/// - The logger has not been initialized with [`init`]
/// - The reload operation fails
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	let level = validate_level(level)?;

	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;

	handle
		.reload(EnvFilter::new(&level))
		.map_err(|e| TelemetryError::ReloadFailed(e.to_string()))
}

fn validate_level(level: &str) -> Result<String, TelemetryError> {
	let level_lower = level.to_lowercase();
	if VALID_LEVELS.contains(&level_lower.as_str()) {
		Ok(level_lower)
	} else {
		Err(TelemetryError::InvalidLogLevel(level.to_string()))
	}
}
