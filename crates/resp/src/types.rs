//! RESP data types and value representation.

use std::fmt;

use bytes::Bytes;

use crate::error::ProtocolError;

/// Represents one decoded RESP reply.
///
/// Null bulk strings and null arrays are `None`, which keeps them distinct
/// from the empty string and the empty array.
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
	/// Simple string: `+OK\r\n`
	SimpleString(String),

	/// Error: `-ERR message\r\n`
	Error(String),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`, or `$-1\r\n` for `None`
	BulkString(Option<Bytes>),

	/// Array: `*2\r\n:1\r\n:2\r\n`, or `*-1\r\n` for `None`
	Array(Option<Vec<RespValue>>),

	/// Malformed input from the peer
	ProtocolError(ProtocolError),
}

impl RespValue {
	/// Check if the value is a server error
	pub fn is_error(&self) -> bool {
		matches!(self, RespValue::Error(_))
	}

	/// Check if the value is a null bulk string or a null array
	pub fn is_null(&self) -> bool {
		matches!(self, RespValue::BulkString(None) | RespValue::Array(None))
	}

	/// Check if the value reports malformed input
	pub fn is_protocol_error(&self) -> bool {
		matches!(self, RespValue::ProtocolError(_))
	}

	/// Try to convert to a string slice
	pub fn as_str(&self) -> Option<&str> {
		match self {
			RespValue::SimpleString(s) => Some(s),
			RespValue::BulkString(Some(b)) => std::str::from_utf8(b).ok(),
			_ => None,
		}
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			RespValue::SimpleString(s) => Some(s.as_bytes()),
			RespValue::BulkString(Some(b)) => Some(b),
			_ => None,
		}
	}

	/// Try to convert to integer
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			RespValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	/// Try to convert to array elements
	pub fn as_array(&self) -> Option<&[RespValue]> {
		match self {
			RespValue::Array(Some(a)) => Some(a),
			_ => None,
		}
	}

	/// Try to consume and convert to Vec<RespValue>
	pub fn into_vec(self) -> Option<Vec<RespValue>> {
		match self {
			RespValue::Array(a) => a,
			_ => None,
		}
	}

	/// Short name of the value's shape, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			RespValue::SimpleString(_) => "simple string",
			RespValue::Error(_) => "error",
			RespValue::Integer(_) => "integer",
			RespValue::BulkString(Some(_)) => "bulk string",
			RespValue::BulkString(None) => "null bulk string",
			RespValue::Array(Some(_)) => "array",
			RespValue::Array(None) => "null array",
			RespValue::ProtocolError(_) => "protocol error",
		}
	}

	// Convenience constructors

	/// Create a simple string value
	pub fn simple_string(s: impl Into<String>) -> Self {
		RespValue::SimpleString(s.into())
	}

	/// Create a present bulk string value
	pub fn bulk_string(s: impl Into<Bytes>) -> Self {
		RespValue::BulkString(Some(s.into()))
	}

	/// Create an error value
	pub fn error(e: impl Into<String>) -> Self {
		RespValue::Error(e.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		RespValue::Integer(i)
	}

	/// Create a present array value from an iterator
	pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Array(Some(items.into_iter().collect()))
	}

	/// Create a null bulk string
	pub fn null_bulk_string() -> Self {
		RespValue::BulkString(None)
	}

	/// Create a null array
	pub fn null_array() -> Self {
		RespValue::Array(None)
	}
}

impl fmt::Display for RespValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RespValue::SimpleString(s) => f.write_str(s),
			RespValue::Error(e) => write!(f, "(error) {e}"),
			RespValue::Integer(i) => write!(f, "(integer) {i}"),
			RespValue::BulkString(Some(b)) => write!(f, "\"{}\"", String::from_utf8_lossy(b)),
			RespValue::BulkString(None) | RespValue::Array(None) => f.write_str("(nil)"),
			RespValue::Array(Some(items)) if items.is_empty() => f.write_str("(empty array)"),
			RespValue::Array(Some(items)) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						writeln!(f)?;
					}
					write!(f, "{}) {item}", i + 1)?;
				}
				Ok(())
			}
			RespValue::ProtocolError(e) => write!(f, "(protocol error) {e}"),
		}
	}
}

impl From<ProtocolError> for RespValue {
	fn from(e: ProtocolError) -> Self {
		RespValue::ProtocolError(e)
	}
}
