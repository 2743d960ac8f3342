use super::ensure_key;
use super::key_params;
use crate::ClientError;
use crate::Session;
use crate::Transport;
use crate::response::expect_bit;
use crate::response::expect_integer;
use crate::response::expect_ok;
use crate::response::expect_simple_string;

impl<T: Transport> Session<T> {
	pub async fn send_del(&mut self, keys: &[&str]) -> Result<(), ClientError> {
		let params = key_params(keys)?;
		self.send("Del", &params).await
	}

	/// Number of keys removed
	pub async fn del(&mut self, keys: &[&str]) -> Result<i64, ClientError> {
		self.send_del(keys).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_exists(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Exists", &[key.into()]).await
	}

	pub async fn exists(&mut self, key: &str) -> Result<bool, ClientError> {
		self.send_exists(key).await?;
		expect_bit(self.read_response().await)
	}

	pub async fn send_expire(&mut self, key: &str, seconds: i64) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Expire", &[key.into(), seconds.into()]).await
	}

	/// `false` when the key does not exist
	pub async fn expire(&mut self, key: &str, seconds: i64) -> Result<bool, ClientError> {
		self.send_expire(key, seconds).await?;
		expect_bit(self.read_response().await)
	}

	pub async fn send_persist(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Persist", &[key.into()]).await
	}

	/// `false` when the key had no timeout
	pub async fn persist(&mut self, key: &str) -> Result<bool, ClientError> {
		self.send_persist(key).await?;
		expect_bit(self.read_response().await)
	}

	pub async fn send_ttl(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("TTL", &[key.into()]).await
	}

	/// Seconds to live, `-1` without a timeout, `-2` when the key is missing
	pub async fn ttl(&mut self, key: &str) -> Result<i64, ClientError> {
		self.send_ttl(key).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_type(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Type", &[key.into()]).await
	}

	pub async fn key_type(&mut self, key: &str) -> Result<String, ClientError> {
		self.send_type(key).await?;
		expect_simple_string(self.read_response().await)
	}

	pub async fn send_rename(&mut self, key: &str, new_key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		ensure_key(new_key)?;
		self.send("Rename", &[key.into(), new_key.into()]).await
	}

	pub async fn rename(&mut self, key: &str, new_key: &str) -> Result<(), ClientError> {
		self.send_rename(key, new_key).await?;
		expect_ok(self.read_response().await)
	}
}
