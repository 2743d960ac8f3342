use std::time::Duration;

use resp::Decoder;
use resp::Encoder;
use resp::Param;
use resp::RespValue;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::ClientError;
use crate::config::ClientConfig;
use crate::connection::TcpConnection;
use crate::connection::Transport;
use crate::connection::with_timeout;
use crate::response::expect_ok;

/// One connection to a server, with its own encoder and decoder.
///
/// Replies come back in the order commands were sent. The session does not
/// track requests, so every [`send`](Session::send) must be matched by
/// exactly one [`read_response`](Session::read_response), in order.
/// A failed write or read leaves the stream out of step with the replies,
/// so the session closes it and stays closed until
/// [`reconnect`](Session::reconnect).
/// Methods take `&mut self`; share a session between tasks behind a
/// `tokio::sync::Mutex`.
pub struct Session<T: Transport> {
	transport: T,
	encoder: Encoder,
	decoder: Decoder,
	send_timeout: Option<Duration>,
	receive_timeout: Option<Duration>,
}

impl Session<TcpConnection> {
	/// Connect over TCP, then authenticate and select the configured database.
	pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
		let send_timeout = config.send_timeout();
		let receive_timeout = config.receive_timeout();

		let mut session =
			Session::new(TcpConnection::new(config)).with_timeouts(send_timeout, receive_timeout);
		session.open().await?;
		Ok(session)
	}
}

impl<T: Transport> Session<T> {
	/// Wrap a transport. No I/O happens until [`open`](Session::open).
	pub fn new(transport: T) -> Self {
		Self {
			transport,
			encoder: Encoder::new(),
			decoder: Decoder::new(),
			send_timeout: None,
			receive_timeout: None,
		}
	}

	/// Bound each write and each reply read. `None` waits forever.
	pub fn with_timeouts(mut self, send: Option<Duration>, receive: Option<Duration>) -> Self {
		self.send_timeout = send;
		self.receive_timeout = receive;
		self
	}

	pub fn is_connected(&self) -> bool {
		self.transport.is_connected()
	}

	/// Connect the transport and run the handshake.
	pub async fn open(&mut self) -> Result<(), ClientError> {
		self.transport.connect().await?;
		self.handshake().await
	}

	/// Drop the current stream, connect again and repeat the handshake.
	pub async fn reconnect(&mut self) -> Result<(), ClientError> {
		self.transport.reconnect().await?;
		info!("reconnected");
		self.handshake().await
	}

	pub async fn close(&mut self) {
		self.transport.close().await;
	}

	async fn handshake(&mut self) -> Result<(), ClientError> {
		if let Some(password) = self.transport.password().map(str::to_owned) {
			self.send("Auth", &[password.into()]).await?;
			expect_ok(self.read_response().await)?;
		}

		let database = self.transport.database();
		if database != 0 {
			self.send("Select", &[database.into()]).await?;
			expect_ok(self.read_response().await)?;
			debug!(database, "selected database");
		}
		Ok(())
	}

	/// Encode and write one command.
	///
	/// A blank command name is rejected before anything reaches the wire.
	/// A write failure or timeout closes the connection.
	pub async fn send(&mut self, command: &str, params: &[Param]) -> Result<(), ClientError> {
		let stream = self.transport.stream().ok_or(ClientError::NotConnected)?;
		debug!(command, params = params.len(), "sending command");

		let written = with_timeout(
			self.send_timeout,
			"send",
			self.encoder.write_command(stream, command, params),
		)
		.await
		.map_err(ClientError::from);

		if let Err(ClientError::Io(e)) = &written {
			error!(error = %e, "failed to send command, closing connection");
			self.transport.close().await;
		}
		written
	}

	/// Read the reply to the oldest unanswered command.
	///
	/// Never fails. A transport error, a timeout or a closed connection is
	/// returned as `RespValue::Error("ERR - <message>")`, so callers handle
	/// every failure through the reply. Any such failure also closes the
	/// connection; a late reply must not be paired with the next command.
	pub async fn read_response(&mut self) -> RespValue {
		let e = match self.try_read_response().await {
			Ok(value) => return value,
			Err(e) => e,
		};

		error!(error = %e, "failed to read response");
		self.transport.close().await;
		match e {
			ClientError::Io(io) => RespValue::error(format!("ERR - {io}")),
			other => RespValue::error(format!("ERR - {other}")),
		}
	}

	async fn try_read_response(&mut self) -> Result<RespValue, ClientError> {
		let stream = self.transport.stream().ok_or(ClientError::NotConnected)?;

		let value = with_timeout(self.receive_timeout, "receive", self.decoder.read_value(stream))
			.await?
			.ok_or(ClientError::ConnectionClosed)?;

		if let RespValue::ProtocolError(e) = &value {
			warn!(error = %e, "malformed response");
		}
		Ok(value)
	}

	/// Send one command and read its reply.
	pub async fn command(&mut self, command: &str, params: &[Param]) -> Result<RespValue, ClientError> {
		self.send(command, params).await?;
		Ok(self.read_response().await)
	}
}
