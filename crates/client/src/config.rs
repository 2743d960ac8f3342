//! Connection settings for a [`Session`](crate::Session)
//!
//! Settings come from code, from a configuration file, or from a
//! `redis://` URL. Every field has a default, so a file only needs the
//! values it changes.
//!
//! # Example
//!
//! ```no_run
//! use client::ClientConfig;
//!
//! let from_file = ClientConfig::from_file("conf/client.toml")?;
//! let from_url: ClientConfig = "redis://:secret@cache.local:6380/2".parse()?;
//! assert_eq!(from_url.addr(), "cache.local:6380");
//! # Ok::<(), client::ConfigError>(())
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::connection::timeout_from_ms;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6379;
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Failed to read configuration file '{path}': {source}")]
	Io {
		source: std::io::Error,
		path: String,
	},

	#[error("Failed to parse TOML configuration: {0}")]
	TomlParse(#[from] toml::de::Error),

	#[error("Failed to parse JSON configuration: {0}")]
	JsonParse(#[from] serde_json::Error),

	#[error("Failed to parse YAML configuration: {0}")]
	YamlParse(#[from] serde_yaml::Error),

	#[error("Unsupported configuration format: {0}")]
	UnsupportedFormat(String),

	#[error("Configuration file has no extension")]
	NoExtension,

	#[error("Invalid connection URL: {0}")]
	InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
	pub host: String,
	pub port: u16,
	/// Logical database selected after connecting
	pub database: i64,
	/// Sent with `AUTH` after connecting
	pub password: Option<String>,
	pub connect_timeout_ms: u64,
	pub receive_timeout_ms: u64,
	pub send_timeout_ms: u64,
	pub read_buffer_size: usize,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.into(),
			port: DEFAULT_PORT,
			database: 0,
			password: None,
			connect_timeout_ms: DEFAULT_TIMEOUT_MS,
			receive_timeout_ms: DEFAULT_TIMEOUT_MS,
			send_timeout_ms: DEFAULT_TIMEOUT_MS,
			read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
		}
	}
}

impl ClientConfig {
	pub fn new(host: impl Into<String>, port: u16) -> Self {
		Self {
			host: host.into(),
			port,
			..Self::default()
		}
	}

	/// `host:port`, suitable for `TcpStream::connect`
	pub fn addr(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	/// `None` when `connect_timeout_ms` is 0 (no limit)
	pub fn connect_timeout(&self) -> Option<Duration> {
		timeout_from_ms(self.connect_timeout_ms)
	}

	pub fn receive_timeout(&self) -> Option<Duration> {
		timeout_from_ms(self.receive_timeout_ms)
	}

	pub fn send_timeout(&self) -> Option<Duration> {
		timeout_from_ms(self.send_timeout_ms)
	}

	/// Load settings from a TOML, JSON or YAML file, chosen by extension.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let path_ref = path.as_ref();
		let content = std::fs::read_to_string(path_ref).map_err(|source| ConfigError::Io {
			path: path_ref.display().to_string(),
			source,
		})?;

		let extension = path_ref
			.extension()
			.and_then(|ext| ext.to_str())
			.ok_or(ConfigError::NoExtension)?;

		match extension.to_lowercase().as_str() {
			"toml" => Ok(toml::from_str(&content)?),
			"json" => Ok(serde_json::from_str(&content)?),
			"yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
			_ => Err(ConfigError::UnsupportedFormat(extension.to_string())),
		}
	}

	/// Parse `redis://[:password@]host[:port][/database]`.
	///
	/// Missing parts keep their defaults.
	pub fn from_url(input: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(input).map_err(|e| ConfigError::InvalidUrl(format!("{input}: {e}")))?;

		if url.scheme() != "redis" {
			return Err(ConfigError::InvalidUrl(format!(
				"unsupported scheme '{}'",
				url.scheme()
			)));
		}

		let mut config = Self::default();

		match url.host_str() {
			Some(host) if !host.is_empty() => config.host = host.to_string(),
			_ => return Err(ConfigError::InvalidUrl(format!("{input}: missing host"))),
		}
		if let Some(port) = url.port() {
			config.port = port;
		}
		config.password = url.password().map(str::to_string);

		let db = url.path().trim_start_matches('/');
		if !db.is_empty() {
			config.database = db
				.parse()
				.map_err(|_| ConfigError::InvalidUrl(format!("invalid database '{db}'")))?;
		}

		Ok(config)
	}
}

impl FromStr for ClientConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_url(s)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[test]
	fn test_defaults() {
		let config = ClientConfig::default();
		assert_eq!(config.addr(), "localhost:6379");
		assert_eq!(config.database, 0);
		assert_eq!(config.password, None);
		assert_eq!(config.connect_timeout(), Some(Duration::from_secs(1)));
		assert_eq!(config.receive_timeout(), Some(Duration::from_secs(1)));
		assert_eq!(config.send_timeout(), Some(Duration::from_secs(1)));
		assert_eq!(config.read_buffer_size, 4096);
	}

	#[test]
	fn test_zero_timeout_means_no_limit() {
		let config = ClientConfig {
			connect_timeout_ms: 0,
			receive_timeout_ms: 0,
			send_timeout_ms: 250,
			..ClientConfig::default()
		};
		assert_eq!(config.connect_timeout(), None);
		assert_eq!(config.receive_timeout(), None);
		assert_eq!(config.send_timeout(), Some(Duration::from_millis(250)));
	}

	#[test]
	fn test_parse_toml() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("client.toml");
		let content = r#"
host = "127.0.0.1"
port = 1234
database = 3
password = "secret"
receive_timeout_ms = 250
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = ClientConfig::from_file(&file_path).unwrap();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 1234);
		assert_eq!(config.database, 3);
		assert_eq!(config.password.as_deref(), Some("secret"));
		assert_eq!(config.receive_timeout_ms, 250);
		assert_eq!(config.send_timeout_ms, DEFAULT_TIMEOUT_MS);
	}

	#[test]
	fn test_parse_json() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("client.json");
		let content = r#"
{
  "host": "127.0.0.1",
  "port": 1234,
  "database": 1
}
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = ClientConfig::from_file(&file_path).unwrap();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 1234);
		assert_eq!(config.database, 1);
	}

	#[test]
	fn test_parse_yaml() {
		let dir = tempfile::tempdir().unwrap();
		let file_path = dir.path().join("client.yml");
		let content = r#"
host: "127.0.0.1"
port: 1234
send_timeout_ms: 50
"#;
		std::fs::write(&file_path, content).unwrap();

		let config = ClientConfig::from_file(&file_path).unwrap();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 1234);
		assert_eq!(config.send_timeout_ms, 50);
	}

	#[test]
	fn test_file_errors() {
		let dir = tempfile::tempdir().unwrap();

		let missing = ClientConfig::from_file(dir.path().join("missing.toml"));
		assert!(matches!(missing, Err(ConfigError::Io { .. })));

		let no_ext = dir.path().join("client");
		std::fs::write(&no_ext, "").unwrap();
		assert!(matches!(
			ClientConfig::from_file(&no_ext),
			Err(ConfigError::NoExtension)
		));

		let ini = dir.path().join("client.ini");
		std::fs::write(&ini, "").unwrap();
		assert!(matches!(
			ClientConfig::from_file(&ini),
			Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
		));

		let bad = dir.path().join("client.toml");
		std::fs::write(&bad, "port = \"not a number\"").unwrap();
		assert!(matches!(
			ClientConfig::from_file(&bad),
			Err(ConfigError::TomlParse(_))
		));
	}

	#[rstest]
	#[case("redis://localhost", "localhost", 6379, 0, None)]
	#[case("redis://10.0.0.5:6380", "10.0.0.5", 6380, 0, None)]
	#[case("redis://cache.local/4", "cache.local", 6379, 4, None)]
	#[case("redis://:secret@cache.local:7000/2", "cache.local", 7000, 2, Some("secret"))]
	fn test_from_url(
		#[case] input: &str,
		#[case] host: &str,
		#[case] port: u16,
		#[case] database: i64,
		#[case] password: Option<&str>,
	) {
		let config: ClientConfig = input.parse().unwrap();
		assert_eq!(config.host, host);
		assert_eq!(config.port, port);
		assert_eq!(config.database, database);
		assert_eq!(config.password.as_deref(), password);
	}

	#[rstest]
	#[case("not a url")]
	#[case("http://localhost")]
	#[case("redis://localhost/abc")]
	fn test_from_url_invalid(#[case] input: &str) {
		assert!(matches!(
			ClientConfig::from_url(input),
			Err(ConfigError::InvalidUrl(_))
		));
	}
}
