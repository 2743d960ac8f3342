//! RESP encoding: command requests and reply values.

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::RespValue;
use crate::error::EncodeError;
use crate::error::WriteError;
use crate::param::Param;
use crate::utils::*;

/// Initial capacity of the per-session scratch buffer.
const DEFAULT_CAPACITY: usize = 1024;

/// Encode a command as an array of bulk strings.
///
/// Writes `*N\r\n` followed by N bulk strings where N is one more than the
/// number of parameters; the command name is the first element.
///
/// # Errors
///
/// Returns [`EncodeError::BlankCommand`] when `command` is empty or only
/// whitespace. Nothing is written to `buf` in that case.
pub fn encode_command(buf: &mut BytesMut, command: &str, params: &[Param]) -> Result<(), EncodeError> {
	if command.trim().is_empty() {
		return Err(EncodeError::BlankCommand);
	}

	encode_length(buf, ARRAY, 1 + params.len());
	encode_bulk_string(buf, command.as_bytes());
	for param in params {
		encode_param(buf, param);
	}
	Ok(())
}

/// Request encoder owned by one session.
///
/// Reuses its buffer between commands; each call to [`Encoder::encode`]
/// starts from an empty frame.
#[derive(Debug)]
pub struct Encoder {
	buf: BytesMut,
}

impl Default for Encoder {
	fn default() -> Self {
		Self::new()
	}
}

impl Encoder {
	pub fn new() -> Self {
		Self {
			buf: BytesMut::with_capacity(DEFAULT_CAPACITY),
		}
	}

	/// Encode one command and return the complete frame.
	pub fn encode(&mut self, command: &str, params: &[Param]) -> Result<&[u8], EncodeError> {
		self.buf.clear();
		encode_command(&mut self.buf, command, params)?;
		Ok(&self.buf)
	}

	/// Encode one command and write the whole frame, then flush.
	///
	/// The frame is complete before the first write, so an
	/// [`EncodeError`] leaves `writer` untouched.
	pub async fn write_command<W>(
		&mut self,
		writer: &mut W,
		command: &str,
		params: &[Param],
	) -> Result<(), WriteError>
	where
		W: AsyncWrite + Unpin,
	{
		let frame = self.encode(command, params)?;
		trace!(bytes = frame.len(), "writing request frame");

		writer.write_all(frame).await?;
		writer.flush().await?;
		Ok(())
	}
}

fn encode_param(buf: &mut BytesMut, param: &Param) {
	match param {
		Param::Null => buf.put_slice(NULL_BULK_STRING),
		Param::Str(s) => encode_bulk_string(buf, s.as_bytes()),
		Param::Bytes(b) => encode_bulk_string(buf, b),
		Param::Bool(b) => encode_bulk_string(buf, if *b { b"1" } else { b"0" }),
		Param::Int(i) => encode_bulk_string(buf, i.to_string().as_bytes()),
		Param::Float(d) => encode_bulk_string(buf, d.to_string().as_bytes()),
		Param::Other(s) => encode_bulk_string(buf, s.as_bytes()),
	}
}

/// Trait for encoding RESP reply values.
///
/// Clients never send replies, but fake servers in tests and tools that
/// record traffic need the reply side of the wire format.
pub trait RespEncoder {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError>;

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for RespValue {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		match self {
			RespValue::SimpleString(s) => encode_line(buf, SIMPLE_STRING, s.as_bytes()),
			RespValue::Error(e) => encode_line(buf, ERROR, e.as_bytes()),
			RespValue::Integer(i) => encode_line(buf, INTEGER, i.to_string().as_bytes()),
			RespValue::BulkString(Some(b)) => encode_bulk_string(buf, b),
			RespValue::BulkString(None) => encode_null(buf, BULK_STRING),
			RespValue::Array(Some(items)) => {
				encode_length(buf, ARRAY, items.len());
				for item in items {
					item.encode_to(buf)?;
				}
			}
			RespValue::Array(None) => encode_null(buf, ARRAY),
			RespValue::ProtocolError(e) => {
				return Err(EncodeError::InvalidValue(format!(
					"protocol errors have no wire form: {e}"
				)));
			}
		}
		Ok(())
	}
}

#[inline]
fn encode_line(buf: &mut BytesMut, marker: u8, line: &[u8]) {
	buf.put_u8(marker);
	buf.put_slice(line);
	buf.put_slice(CRLF);
}

#[inline]
fn encode_length(buf: &mut BytesMut, marker: u8, length: usize) {
	encode_line(buf, marker, length.to_string().as_bytes());
}

#[inline]
fn encode_null(buf: &mut BytesMut, marker: u8) {
	encode_line(buf, marker, NULL_LENGTH.to_string().as_bytes());
}

#[inline]
fn encode_bulk_string(buf: &mut BytesMut, data: &[u8]) {
	encode_length(buf, BULK_STRING, data.len());
	buf.put_slice(data);
	buf.put_slice(CRLF);
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::error::ProtocolError;

	fn encoded(command: &str, params: &[Param]) -> Vec<u8> {
		let mut buf = BytesMut::new();
		encode_command(&mut buf, command, params).unwrap();
		buf.to_vec()
	}

	#[test]
	fn test_encode_command_without_parameters() {
		assert_eq!(encoded("Ping", &[]), b"*1\r\n$4\r\nPing\r\n");
		assert_eq!(encoded("DoIt", &[]), b"*1\r\n$4\r\nDoIt\r\n");
	}

	#[test]
	fn test_encode_command_with_one_parameter() {
		assert_eq!(
			encoded("Get", &["AKey".into()]),
			b"*2\r\n$3\r\nGet\r\n$4\r\nAKey\r\n"
		);
	}

	#[rstest]
	#[case(Param::Null, b"$-1\r\n")]
	#[case(Param::Bool(true), b"$1\r\n1\r\n")]
	#[case(Param::Bool(false), b"$1\r\n0\r\n")]
	#[case(Param::Int(-42), b"$3\r\n-42\r\n")]
	#[case(Param::Float(1.5), b"$3\r\n1.5\r\n")]
	#[case(Param::Float(10.0), b"$2\r\n10\r\n")]
	#[case(Param::Float(f64::INFINITY), b"$3\r\ninf\r\n")]
	#[case(Param::Float(f64::NEG_INFINITY), b"$4\r\n-inf\r\n")]
	#[case(Param::Str(String::new()), b"$0\r\n\r\n")]
	#[case(Param::Other("keyspace".into()), b"$8\r\nkeyspace\r\n")]
	fn test_encode_param(#[case] param: Param, #[case] expected: &[u8]) {
		let mut buf = BytesMut::new();
		encode_param(&mut buf, &param);
		assert_eq!(&buf[..], expected);
	}

	#[test]
	fn test_string_length_is_utf8_byte_length() {
		// "héllo" is 5 characters but 6 bytes.
		assert_eq!(
			encoded("Set", &["k".into(), "héllo".into()]),
			"*3\r\n$3\r\nSet\r\n$1\r\nk\r\n$6\r\nhéllo\r\n".as_bytes()
		);
	}

	#[test]
	fn test_bytes_are_written_unchanged() {
		let raw: Vec<u8> = vec![0, 13, 10, 255];
		let frame = encoded("Set", &["k".into(), raw.clone().into()]);
		let mut expected = b"*3\r\n$3\r\nSet\r\n$1\r\nk\r\n$4\r\n".to_vec();
		expected.extend_from_slice(&raw);
		expected.extend_from_slice(b"\r\n");
		assert_eq!(frame, expected);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("\t\r\n")]
	fn test_blank_command_is_rejected(#[case] command: &str) {
		let mut buf = BytesMut::new();
		assert_eq!(
			encode_command(&mut buf, command, &["x".into()]),
			Err(EncodeError::BlankCommand)
		);
		assert!(buf.is_empty());
	}

	#[test]
	fn test_encoder_reuses_buffer() {
		let mut encoder = Encoder::new();
		assert_eq!(
			encoder.encode("Get", &["a".into()]).unwrap(),
			b"*2\r\n$3\r\nGet\r\n$1\r\na\r\n"
		);
		assert_eq!(encoder.encode("Ping", &[]).unwrap(), b"*1\r\n$4\r\nPing\r\n");
		assert!(encoder.encode(" ", &[]).is_err());
	}

	#[rstest]
	#[case(RespValue::simple_string("OK"), b"+OK\r\n")]
	#[case(RespValue::error("ERR bad"), b"-ERR bad\r\n")]
	#[case(RespValue::integer(-100), b":-100\r\n")]
	#[case(RespValue::bulk_string("hello"), b"$5\r\nhello\r\n")]
	#[case(RespValue::bulk_string(""), b"$0\r\n\r\n")]
	#[case(RespValue::null_bulk_string(), b"$-1\r\n")]
	#[case(RespValue::array(vec![]), b"*0\r\n")]
	#[case(RespValue::null_array(), b"*-1\r\n")]
	#[case(
		RespValue::array(vec![RespValue::integer(1), RespValue::null_bulk_string()]),
		b"*2\r\n:1\r\n$-1\r\n"
	)]
	fn test_encode_value(#[case] value: RespValue, #[case] expected: &[u8]) {
		assert_eq!(&value.encode().unwrap()[..], expected);
	}

	#[test]
	fn test_protocol_error_cannot_be_encoded() {
		let value = RespValue::ProtocolError(ProtocolError::UnexpectedEof);
		assert!(matches!(value.encode(), Err(EncodeError::InvalidValue(_))));
	}
}
