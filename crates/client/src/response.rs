//! Typed projections over a decoded reply.
//!
//! Every helper maps an error reply to [`ClientError::Server`] and malformed
//! input to [`ClientError::Protocol`], so callers only match on the shape
//! they asked for.

use bytes::Bytes;
use resp::RespValue;

use crate::ClientError;

const OK: &str = "OK";
const PONG: &str = "PONG";

fn unexpected(expected: &'static str, value: RespValue) -> ClientError {
	match value {
		RespValue::Error(message) => ClientError::Server(message),
		RespValue::ProtocolError(e) => ClientError::Protocol(e),
		other => ClientError::UnexpectedResponseType {
			expected,
			actual: other.kind(),
		},
	}
}

pub fn expect_simple_string(value: RespValue) -> Result<String, ClientError> {
	match value {
		RespValue::SimpleString(s) => Ok(s),
		other => Err(unexpected("simple string", other)),
	}
}

/// Expect a simple string equal to `expected`.
pub fn expect_const_string(value: RespValue, expected: &str) -> Result<(), ClientError> {
	let actual = expect_simple_string(value)?;
	if actual == expected {
		Ok(())
	} else {
		Err(ClientError::UnexpectedResponse {
			expected: expected.to_string(),
			actual,
		})
	}
}

pub fn expect_ok(value: RespValue) -> Result<(), ClientError> {
	expect_const_string(value, OK)
}

pub fn expect_pong(value: RespValue) -> Result<(), ClientError> {
	expect_const_string(value, PONG)
}

/// `None` for a null bulk string.
pub fn expect_bulk_string(value: RespValue) -> Result<Option<Bytes>, ClientError> {
	match value {
		RespValue::BulkString(b) => Ok(b),
		other => Err(unexpected("bulk string", other)),
	}
}

/// Like [`expect_bulk_string`], decoding the payload as UTF-8 (lossy).
pub fn expect_bulk_utf8(value: RespValue) -> Result<Option<String>, ClientError> {
	Ok(expect_bulk_string(value)?.map(|b| String::from_utf8_lossy(&b).into_owned()))
}

pub fn expect_integer(value: RespValue) -> Result<i64, ClientError> {
	match value {
		RespValue::Integer(i) => Ok(i),
		other => Err(unexpected("integer", other)),
	}
}

/// An integer reply that must be 0 or 1.
pub fn expect_bit(value: RespValue) -> Result<bool, ClientError> {
	match expect_integer(value)? {
		0 => Ok(false),
		1 => Ok(true),
		n => Err(ClientError::UnexpectedResponse {
			expected: "0 or 1".to_string(),
			actual: n.to_string(),
		}),
	}
}

/// `None` for a null array.
pub fn expect_array(value: RespValue) -> Result<Option<Vec<RespValue>>, ClientError> {
	match value {
		RespValue::Array(a) => Ok(a),
		other => Err(unexpected("array", other)),
	}
}
