use resp::RespValue;

use super::key_params;
use crate::ClientError;
use crate::Session;
use crate::Transport;
use crate::response::expect_array;
use crate::response::expect_ok;

impl<T: Transport> Session<T> {
	pub async fn send_multi(&mut self) -> Result<(), ClientError> {
		self.send("Multi", &[]).await
	}

	/// Start a transaction. Commands sent afterwards reply `QUEUED`.
	pub async fn multi(&mut self) -> Result<(), ClientError> {
		self.send_multi().await?;
		expect_ok(self.read_response().await)
	}

	pub async fn send_exec(&mut self) -> Result<(), ClientError> {
		self.send("Exec", &[]).await
	}

	/// Replies of the queued commands, or `None` when a watched key changed
	/// and the transaction was aborted.
	pub async fn exec(&mut self) -> Result<Option<Vec<RespValue>>, ClientError> {
		self.send_exec().await?;
		expect_array(self.read_response().await)
	}

	pub async fn send_discard(&mut self) -> Result<(), ClientError> {
		self.send("Discard", &[]).await
	}

	pub async fn discard(&mut self) -> Result<(), ClientError> {
		self.send_discard().await?;
		expect_ok(self.read_response().await)
	}

	pub async fn send_watch(&mut self, keys: &[&str]) -> Result<(), ClientError> {
		let params = key_params(keys)?;
		self.send("Watch", &params).await
	}

	pub async fn watch(&mut self, keys: &[&str]) -> Result<(), ClientError> {
		self.send_watch(keys).await?;
		expect_ok(self.read_response().await)
	}

	pub async fn send_unwatch(&mut self) -> Result<(), ClientError> {
		self.send("Unwatch", &[]).await
	}

	pub async fn unwatch(&mut self) -> Result<(), ClientError> {
		self.send_unwatch().await?;
		expect_ok(self.read_response().await)
	}
}
