use std::io;

use resp::EncodeError;
use resp::ProtocolError;
use resp::WriteError;
use thiserror::Error;

/// Errors returned by [`Session`](crate::Session) and the typed response helpers.
#[derive(Error, Debug)]
pub enum ClientError {
	/// The request could not be encoded
	#[error("failed to encode command: {0}")]
	Encode(#[from] EncodeError),

	/// Transport failure while connecting or writing
	#[error("transport error: {0}")]
	Io(#[from] io::Error),

	/// The transport has no open stream
	#[error("not connected")]
	NotConnected,

	/// The peer closed the connection
	#[error("connection closed by peer")]
	ConnectionClosed,

	/// The server answered with an error reply
	#[error("{0}")]
	Server(String),

	/// The reply was malformed
	#[error("protocol error: {0}")]
	Protocol(#[from] ProtocolError),

	/// The reply had a different shape than the command produces
	#[error("Invalid response type. Expected {expected} received {actual}")]
	UnexpectedResponseType {
		expected: &'static str,
		actual: &'static str,
	},

	/// The reply had the right shape but an unexpected value
	#[error("Unexpected response. Expected {expected} received {actual}")]
	UnexpectedResponse { expected: String, actual: String },

	/// A command helper was given an unusable argument
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

impl From<WriteError> for ClientError {
	fn from(error: WriteError) -> Self {
		match error {
			WriteError::Encode(e) => ClientError::Encode(e),
			WriteError::Io(e) => ClientError::Io(e),
		}
	}
}
