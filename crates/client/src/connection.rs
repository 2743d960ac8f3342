use std::future::Future;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufStream;
use tokio::net::TcpStream;
use tracing::debug;
use tracing::info;

use crate::config::ClientConfig;

/// A byte stream to a Redis server that a [`Session`](crate::Session) reads
/// from and writes to.
///
/// Implementations own the socket. The session owns the codec and decides
/// when to read and write.
#[async_trait]
pub trait Transport: Send {
	type Stream: AsyncBufRead + AsyncWrite + Unpin + Send;

	/// Establish the connection. Does nothing when already connected.
	async fn connect(&mut self) -> io::Result<()>;

	/// Drop the current stream, if any, and connect again.
	async fn reconnect(&mut self) -> io::Result<()> {
		self.close().await;
		self.connect().await
	}

	fn is_connected(&self) -> bool;

	/// The open stream, or `None` before `connect` and after `close`.
	fn stream(&mut self) -> Option<&mut Self::Stream>;

	/// Release the stream.
	async fn close(&mut self);

	/// Logical database the session selects after connecting
	fn database(&self) -> i64 {
		0
	}

	/// Password the session authenticates with after connecting
	fn password(&self) -> Option<&str> {
		None
	}
}

/// The default transport: a buffered TCP stream.
pub struct TcpConnection {
	config: ClientConfig,
	stream: Option<BufStream<TcpStream>>,
}

impl TcpConnection {
	pub fn new(config: ClientConfig) -> Self {
		Self {
			config,
			stream: None,
		}
	}
}

#[async_trait]
impl Transport for TcpConnection {
	type Stream = BufStream<TcpStream>;

	async fn connect(&mut self) -> io::Result<()> {
		if self.stream.is_some() {
			return Ok(());
		}

		let addr = self.config.addr();
		let socket = with_timeout(self.config.connect_timeout(), "connect", TcpStream::connect(&addr)).await?;
		socket.set_nodelay(true)?;

		let capacity = self.config.read_buffer_size.max(1);
		self.stream = Some(BufStream::with_capacity(capacity, capacity, socket));
		info!(%addr, "connected");
		Ok(())
	}

	fn is_connected(&self) -> bool {
		self.stream.is_some()
	}

	fn stream(&mut self) -> Option<&mut Self::Stream> {
		self.stream.as_mut()
	}

	async fn close(&mut self) {
		if let Some(mut stream) = self.stream.take() {
			if let Err(e) = stream.shutdown().await {
				debug!(error = %e, "shutdown failed while closing connection");
			}
			debug!(addr = %self.config.addr(), "connection closed");
		}
	}

	fn database(&self) -> i64 {
		self.config.database
	}

	fn password(&self) -> Option<&str> {
		self.config.password.as_deref()
	}
}

/// Zero means no limit.
pub(crate) fn timeout_from_ms(ms: u64) -> Option<Duration> {
	(ms > 0).then(|| Duration::from_millis(ms))
}

/// Run `fut` under an optional deadline, reporting expiry as an
/// `io::ErrorKind::TimedOut` error.
pub(crate) async fn with_timeout<F, T, E>(limit: Option<Duration>, operation: &str, fut: F) -> Result<T, E>
where
	F: Future<Output = Result<T, E>>,
	E: From<io::Error>,
{
	let Some(limit) = limit else {
		return fut.await;
	};

	match tokio::time::timeout(limit, fut).await {
		Ok(result) => result,
		Err(_) => Err(io::Error::new(
			io::ErrorKind::TimedOut,
			format!("{operation} timed out after {}ms", limit.as_millis()),
		)
		.into()),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use tokio::net::TcpListener;

	use super::*;

	#[rstest]
	#[case(0, None)]
	#[case(1000, Some(Duration::from_secs(1)))]
	fn test_timeout_from_ms(#[case] ms: u64, #[case] expected: Option<Duration>) {
		assert_eq!(timeout_from_ms(ms), expected);
	}

	#[tokio::test]
	async fn test_with_timeout_expires() {
		let result: io::Result<()> = with_timeout(
			Some(Duration::from_millis(10)),
			"receive",
			std::future::pending(),
		)
		.await;

		let err = result.unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::TimedOut);
		assert_eq!(err.to_string(), "receive timed out after 10ms");
	}

	#[tokio::test]
	async fn test_tcp_connect_and_close() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let port = listener.local_addr().unwrap().port();
		let accept = tokio::spawn(async move { listener.accept().await.unwrap() });

		let mut conn = TcpConnection::new(ClientConfig::new("127.0.0.1", port));
		assert!(!conn.is_connected());
		assert!(conn.stream().is_none());

		conn.connect().await.unwrap();
		assert!(conn.is_connected());
		assert!(conn.stream().is_some());
		accept.await.unwrap();

		// Connecting again is a no-op
		conn.connect().await.unwrap();

		conn.close().await;
		assert!(!conn.is_connected());
	}

	#[tokio::test]
	async fn test_tcp_connect_refused() {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let port = listener.local_addr().unwrap().port();
		drop(listener);

		let mut conn = TcpConnection::new(ClientConfig::new("127.0.0.1", port));
		assert!(conn.connect().await.is_err());
		assert!(!conn.is_connected());
	}

	#[test]
	fn test_tcp_connection_settings() {
		let config = ClientConfig {
			database: 5,
			password: Some("pw".into()),
			..ClientConfig::default()
		};
		let conn = TcpConnection::new(config);
		assert_eq!(conn.database(), 5);
		assert_eq!(conn.password(), Some("pw"));
	}
}
