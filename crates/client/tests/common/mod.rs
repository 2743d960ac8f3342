//! Shared fixtures for client integration tests: an in-memory transport and
//! a scripted server that records every request it receives.

#![allow(dead_code)]

use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use client::Session;
use client::Transport;
use resp::RespEncoder;
use resp::RespValue;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::io::BufStream;
use tokio::io::DuplexStream;
use tokio::task::JoinHandle;

/// A transport over one half of a `tokio::io::duplex` pipe.
pub struct DuplexTransport {
	stream: Option<BufStream<DuplexStream>>,
	database: i64,
	password: Option<String>,
}

impl DuplexTransport {
	pub fn new(stream: DuplexStream) -> Self {
		Self {
			stream: Some(BufStream::new(stream)),
			database: 0,
			password: None,
		}
	}

	pub fn disconnected() -> Self {
		Self {
			stream: None,
			database: 0,
			password: None,
		}
	}

	pub fn with_database(mut self, database: i64) -> Self {
		self.database = database;
		self
	}

	pub fn with_password(mut self, password: &str) -> Self {
		self.password = Some(password.to_string());
		self
	}
}

#[async_trait]
impl Transport for DuplexTransport {
	type Stream = BufStream<DuplexStream>;

	async fn connect(&mut self) -> io::Result<()> {
		if self.stream.is_some() {
			Ok(())
		} else {
			Err(io::Error::new(
				io::ErrorKind::ConnectionRefused,
				"in-memory peer is gone",
			))
		}
	}

	fn is_connected(&self) -> bool {
		self.stream.is_some()
	}

	fn stream(&mut self) -> Option<&mut Self::Stream> {
		self.stream.as_mut()
	}

	async fn close(&mut self) {
		if let Some(mut stream) = self.stream.take() {
			let _ = stream.shutdown().await;
		}
	}

	fn database(&self) -> i64 {
		self.database
	}

	fn password(&self) -> Option<&str> {
		self.password.as_deref()
	}
}

/// Encode a reply the way a server writes it.
pub fn wire(value: RespValue) -> Bytes {
	value.encode().unwrap()
}

/// Answer each request with the next scripted frame, then hang up.
///
/// Returns every request as its list of words, in arrival order.
pub async fn serve<S>(mut stream: S, replies: Vec<Bytes>) -> Vec<Vec<String>>
where
	S: AsyncBufRead + AsyncWrite + Unpin,
{
	let mut requests = Vec::new();
	let mut replies = replies.into_iter();

	while let Some(request) = resp::read_value(&mut stream).await.unwrap() {
		requests.push(words(request));

		let Some(reply) = replies.next() else {
			break;
		};
		stream.write_all(&reply).await.unwrap();
		stream.flush().await.unwrap();
	}
	requests
}

fn words(request: RespValue) -> Vec<String> {
	request
		.into_vec()
		.unwrap_or_default()
		.iter()
		.map(|word| match word.as_bytes() {
			Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
			None => "(nil)".to_string(),
		})
		.collect()
}

/// A transport wired to a scripted server running on its own task.
pub fn scripted(replies: Vec<RespValue>) -> (DuplexTransport, JoinHandle<Vec<Vec<String>>>) {
	scripted_raw(replies.into_iter().map(wire).collect())
}

/// Like [`scripted`], with replies given as raw wire bytes.
pub fn scripted_raw(replies: Vec<Bytes>) -> (DuplexTransport, JoinHandle<Vec<Vec<String>>>) {
	telemetry::init_for_tests();

	let (client_half, server_half) = tokio::io::duplex(64 * 1024);
	let server = tokio::spawn(serve(BufStream::new(server_half), replies));
	(DuplexTransport::new(client_half), server)
}

/// A connected session talking to a scripted server.
pub fn session(replies: Vec<RespValue>) -> (Session<DuplexTransport>, JoinHandle<Vec<Vec<String>>>) {
	let (transport, server) = scripted(replies);
	(Session::new(transport), server)
}

/// Close the session and collect what the server received.
pub async fn finish(mut session: Session<DuplexTransport>, server: JoinHandle<Vec<Vec<String>>>) -> Vec<Vec<String>> {
	session.close().await;
	drop(session);
	server.await.unwrap()
}

pub fn request(words: &[&str]) -> Vec<String> {
	words.iter().map(|w| w.to_string()).collect()
}
