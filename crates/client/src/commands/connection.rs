use bytes::Bytes;

use crate::ClientError;
use crate::Session;
use crate::Transport;
use crate::response::expect_bulk_string;
use crate::response::expect_ok;
use crate::response::expect_pong;

impl<T: Transport> Session<T> {
	pub async fn send_auth(&mut self, password: &str) -> Result<(), ClientError> {
		self.send("Auth", &[password.into()]).await
	}

	pub async fn auth(&mut self, password: &str) -> Result<(), ClientError> {
		self.send_auth(password).await?;
		expect_ok(self.read_response().await)
	}

	pub async fn send_echo(&mut self, message: &str) -> Result<(), ClientError> {
		self.send("Echo", &[message.into()]).await
	}

	pub async fn echo(&mut self, message: &str) -> Result<Option<Bytes>, ClientError> {
		self.send_echo(message).await?;
		expect_bulk_string(self.read_response().await)
	}

	pub async fn send_ping(&mut self) -> Result<(), ClientError> {
		self.send("Ping", &[]).await
	}

	pub async fn ping(&mut self) -> Result<(), ClientError> {
		self.send_ping().await?;
		expect_pong(self.read_response().await)
	}

	pub async fn send_quit(&mut self) -> Result<(), ClientError> {
		self.send("Quit", &[]).await
	}

	/// Ask the server to close the connection, then close our side.
	pub async fn quit(&mut self) -> Result<(), ClientError> {
		self.send_quit().await?;
		let reply = expect_ok(self.read_response().await);
		self.close().await;
		reply
	}

	pub async fn send_select(&mut self, database: i64) -> Result<(), ClientError> {
		self.send("Select", &[database.into()]).await
	}

	pub async fn select(&mut self, database: i64) -> Result<(), ClientError> {
		self.send_select(database).await?;
		expect_ok(self.read_response().await)
	}
}
