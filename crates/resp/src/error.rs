//! Error types for RESP encoding and decoding.

use std::io;

use thiserror::Error;

/// Errors that can occur while encoding a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
	/// The command name was empty or contained only whitespace
	#[error("command name must not be blank")]
	BlankCommand,

	/// The value has no wire representation
	#[error("Invalid value: {0}")]
	InvalidValue(String),
}

/// Errors from [`Encoder::write_command`](crate::Encoder::write_command).
#[derive(Error, Debug)]
pub enum WriteError {
	/// Rejected before any byte was written
	#[error(transparent)]
	Encode(#[from] EncodeError),

	/// The writer failed, possibly after part of the frame went out
	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Malformed input received from the peer.
///
/// These are never raised by the decoder. They are carried inside
/// [`RespValue::ProtocolError`](crate::RespValue::ProtocolError) so the caller
/// decides whether the connection is still usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
	/// Invalid type marker encountered
	#[error("Invalid response initial character {}", char::from(*.0))]
	InvalidTypeMarker(u8),

	/// Integer line that is not a base-10 i64
	#[error("Invalid integer {0}")]
	InvalidInteger(String),

	/// Negative length other than the -1 null marker
	#[error("Invalid length {0}")]
	InvalidLength(i64),

	/// Bulk string payload did not match its declared length
	#[error("String length is incorrect. Expecting {expected} received {actual}")]
	BulkLengthMismatch { expected: usize, actual: usize },

	/// The stream ended in the middle of a value
	#[error("Unexpected end of input")]
	UnexpectedEof,
}
