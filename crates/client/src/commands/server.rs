use std::fmt;

use resp::Param;
use resp::RespValue;

use super::expect_present_array;
use super::parse_bulk;
use crate::ClientError;
use crate::Session;
use crate::Transport;
use crate::response::expect_bulk_utf8;
use crate::response::expect_integer;
use crate::response::expect_ok;

/// Sections accepted by `INFO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSection {
	All,
	Clients,
	Cluster,
	CommandStats,
	Cpu,
	Default,
	Keyspace,
	Memory,
	Persistence,
	Replication,
	Server,
	Stats,
}

impl InfoSection {
	pub fn as_str(&self) -> &'static str {
		match self {
			InfoSection::All => "all",
			InfoSection::Clients => "clients",
			InfoSection::Cluster => "cluster",
			InfoSection::CommandStats => "commandstats",
			InfoSection::Cpu => "cpu",
			InfoSection::Default => "default",
			InfoSection::Keyspace => "keyspace",
			InfoSection::Memory => "memory",
			InfoSection::Persistence => "persistence",
			InfoSection::Replication => "replication",
			InfoSection::Server => "server",
			InfoSection::Stats => "stats",
		}
	}
}

impl fmt::Display for InfoSection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<InfoSection> for Param {
	fn from(section: InfoSection) -> Self {
		Param::from(section.as_str())
	}
}

impl<T: Transport> Session<T> {
	pub async fn send_dbsize(&mut self) -> Result<(), ClientError> {
		self.send("DbSize", &[]).await
	}

	pub async fn dbsize(&mut self) -> Result<i64, ClientError> {
		self.send_dbsize().await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_flushdb(&mut self) -> Result<(), ClientError> {
		self.send("FlushDb", &[]).await
	}

	pub async fn flushdb(&mut self) -> Result<(), ClientError> {
		self.send_flushdb().await?;
		expect_ok(self.read_response().await)
	}

	/// `None` asks for the server's default sections.
	pub async fn send_info(&mut self, section: Option<InfoSection>) -> Result<(), ClientError> {
		match section {
			Some(section) => self.send("Info", &[section.into()]).await,
			None => self.send("Info", &[]).await,
		}
	}

	pub async fn info(&mut self, section: Option<InfoSection>) -> Result<String, ClientError> {
		self.send_info(section).await?;
		expect_bulk_utf8(self.read_response().await)?.ok_or(ClientError::UnexpectedResponseType {
			expected: "bulk string",
			actual: "null bulk string",
		})
	}

	pub async fn send_time(&mut self) -> Result<(), ClientError> {
		self.send("Time", &[]).await
	}

	/// Server clock as `(unix seconds, microseconds)`
	pub async fn time(&mut self) -> Result<(i64, i64), ClientError> {
		self.send_time().await?;
		let reply = expect_present_array(self.read_response().await)?;

		let [seconds, micros]: [RespValue; 2] = reply.try_into().map_err(|parts: Vec<RespValue>| {
			ClientError::UnexpectedResponse {
				expected: "2 elements".into(),
				actual: format!("{} elements", parts.len()),
			}
		})?;
		Ok((parse_bulk(seconds)?, parse_bulk(micros)?))
	}
}
