//! Utility functions and constants for RESP protocol.

use crate::error::ProtocolError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP2
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Encoded null bulk string
pub const NULL_BULK_STRING: &[u8] = b"$-1\r\n";

/// Length value that marks a null bulk string or array
pub const NULL_LENGTH: i64 = -1;

/// Find the position of the first CRLF in a byte slice
#[inline]
pub fn find_crlf(buf: &[u8]) -> Option<usize> {
	memchr::memmem::find(buf, CRLF)
}

/// Parse a base-10 signed integer line
#[inline]
pub fn parse_integer(line: &[u8]) -> Result<i64, ProtocolError> {
	std::str::from_utf8(line)
		.ok()
		.and_then(|s| s.parse::<i64>().ok())
		.ok_or_else(|| ProtocolError::InvalidInteger(String::from_utf8_lossy(line).into_owned()))
}
