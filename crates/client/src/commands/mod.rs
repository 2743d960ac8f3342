//! Command helpers on [`Session`](crate::Session).
//!
//! Each command comes as a `send_*` method that only validates and marshals
//! its arguments, leaving the reply for the caller to read. Most also have a
//! convenience method without the prefix that sends the command and reads
//! its typed reply.

mod connection;
mod keys;
mod server;
mod strings;
mod transaction;

use std::str::FromStr;

use resp::Param;
use resp::RespValue;
pub use server::InfoSection;
pub use strings::SetCondition;
pub use strings::SetOptions;

use crate::ClientError;
use crate::response::expect_array;
use crate::response::expect_bulk_utf8;

fn ensure_key(key: &str) -> Result<(), ClientError> {
	if key.trim().is_empty() {
		return Err(ClientError::InvalidArgument("key must not be blank".into()));
	}
	Ok(())
}

/// Validate a non-empty list of keys and turn it into parameters.
fn key_params(keys: &[&str]) -> Result<Vec<Param>, ClientError> {
	if keys.is_empty() {
		return Err(ClientError::InvalidArgument("at least one key is required".into()));
	}
	keys.iter()
		.map(|key| ensure_key(key).map(|()| Param::from(*key)))
		.collect()
}

/// A bulk string holding a number, as sent by `INCRBYFLOAT` and `TIME`.
fn parse_bulk<T: FromStr>(value: RespValue) -> Result<T, ClientError> {
	let text = expect_bulk_utf8(value)?.ok_or(ClientError::UnexpectedResponseType {
		expected: "bulk string",
		actual: "null bulk string",
	})?;
	text.parse().map_err(|_| ClientError::UnexpectedResponse {
		expected: "a number".into(),
		actual: text,
	})
}

/// An array reply that is never null for the command that produced it.
fn expect_present_array(value: RespValue) -> Result<Vec<RespValue>, ClientError> {
	expect_array(value)?.ok_or(ClientError::UnexpectedResponseType {
		expected: "array",
		actual: "null array",
	})
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("\t\r\n")]
	fn test_blank_key(#[case] key: &str) {
		assert!(matches!(ensure_key(key), Err(ClientError::InvalidArgument(_))));
	}

	#[test]
	fn test_key_params() {
		assert_eq!(
			key_params(&["a", "b"]).unwrap(),
			vec![Param::from("a"), Param::from("b")]
		);
		assert!(key_params(&[]).is_err());
		assert!(key_params(&["a", " "]).is_err());
	}

	#[test]
	fn test_parse_bulk() {
		assert_eq!(parse_bulk::<f64>(RespValue::bulk_string("10.5")).unwrap(), 10.5);
		assert!(matches!(
			parse_bulk::<i64>(RespValue::bulk_string("abc")),
			Err(ClientError::UnexpectedResponse { actual, .. }) if actual == "abc"
		));
		assert!(matches!(
			parse_bulk::<i64>(RespValue::null_bulk_string()),
			Err(ClientError::UnexpectedResponseType { .. })
		));
	}
}
