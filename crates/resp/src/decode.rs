//! Streaming RESP reply decoder.
//!
//! The decoder pulls bytes from any [`AsyncBufRead`] and consumes exactly the
//! bytes of one reply per call, leaving the reader positioned at the start of
//! the next reply. Arrays are assembled on an explicit frame stack, so
//! nesting depth is limited by memory rather than by the call stack.

use std::io;

use bytes::Bytes;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tracing::trace;

use crate::error::ProtocolError;
use crate::types::RespValue;
use crate::utils::*;

/// Upper bound on memory reserved before the bytes actually arrive.
const MAX_PREALLOCATION: usize = 64 * 1024;

/// An array that is still waiting for elements.
#[derive(Debug)]
struct Frame {
	expected: usize,
	elements: Vec<RespValue>,
}

// Helper enum for parse_step
enum ParsedItem {
	Value(RespValue),
	FramePushed,
}

/// Reply decoder owned by one session.
///
/// Holds no state between top-level calls; the frame stack is only reused
/// to avoid reallocating it for every reply.
#[derive(Debug, Default)]
pub struct Decoder {
	frames: Vec<Frame>,
}

impl Decoder {
	pub fn new() -> Self {
		Self { frames: Vec::new() }
	}

	/// Read exactly one reply.
	///
	/// Returns `Ok(None)` when the stream is already at end of input, which
	/// callers treat as the peer having closed the connection. Malformed input
	/// is returned as [`RespValue::ProtocolError`]; `Err` is reserved for
	/// failures of the underlying reader.
	pub async fn read_value<R>(&mut self, reader: &mut R) -> io::Result<Option<RespValue>>
	where
		R: AsyncBufRead + Unpin,
	{
		self.frames.clear();

		loop {
			let Some(marker) = read_byte(reader).await? else {
				if self.frames.is_empty() {
					return Ok(None);
				}
				// The stream ended between array elements.
				self.frames.clear();
				return Ok(Some(ProtocolError::UnexpectedEof.into()));
			};

			let value = match self.parse_step(marker, reader).await? {
				ParsedItem::FramePushed => continue,
				ParsedItem::Value(value) => value,
			};

			if let Some(complete) = self.handle_parsed_value(value) {
				trace!(kind = complete.kind(), "decoded reply");
				return Ok(Some(complete));
			}
		}
	}

	/// Push a finished value into the innermost open array, closing every
	/// array that becomes full. Returns the root value once it is complete.
	fn handle_parsed_value(&mut self, mut value: RespValue) -> Option<RespValue> {
		while let Some(mut frame) = self.frames.pop() {
			frame.elements.push(value);
			if frame.elements.len() < frame.expected {
				self.frames.push(frame);
				return None;
			}
			value = RespValue::Array(Some(frame.elements));
		}
		Some(value)
	}

	async fn parse_step<R>(&mut self, marker: u8, reader: &mut R) -> io::Result<ParsedItem>
	where
		R: AsyncBufRead + Unpin,
	{
		let value = match marker {
			SIMPLE_STRING => match read_line(reader).await? {
				Some(line) => RespValue::SimpleString(into_text(line)),
				None => ProtocolError::UnexpectedEof.into(),
			},
			ERROR => match read_line(reader).await? {
				Some(line) => RespValue::Error(into_text(line)),
				None => ProtocolError::UnexpectedEof.into(),
			},
			INTEGER => match read_integer(reader).await? {
				Ok(i) => RespValue::Integer(i),
				Err(e) => e.into(),
			},
			BULK_STRING => read_bulk_string(reader).await?,
			ARRAY => match read_integer(reader).await? {
				Ok(NULL_LENGTH) => RespValue::Array(None),
				Ok(0) => RespValue::Array(Some(Vec::new())),
				Ok(length) => match usize::try_from(length) {
					Ok(expected) => {
						self.frames.push(Frame {
							expected,
							elements: Vec::with_capacity(expected.min(MAX_PREALLOCATION)),
						});
						return Ok(ParsedItem::FramePushed);
					}
					Err(_) => ProtocolError::InvalidLength(length).into(),
				},
				Err(e) => e.into(),
			},
			other => ProtocolError::InvalidTypeMarker(other).into(),
		};
		Ok(ParsedItem::Value(value))
	}
}

/// Read one reply with a fresh decoder.
pub async fn read_value<R>(reader: &mut R) -> io::Result<Option<RespValue>>
where
	R: AsyncBufRead + Unpin,
{
	Decoder::new().read_value(reader).await
}

async fn read_byte<R>(reader: &mut R) -> io::Result<Option<u8>>
where
	R: AsyncBufRead + Unpin,
{
	let byte = match reader.fill_buf().await?.first() {
		Some(byte) => *byte,
		None => return Ok(None),
	};
	reader.consume(1);
	Ok(Some(byte))
}

/// Read a CRLF-terminated line without its terminator.
///
/// Only a CR immediately followed by LF ends the line and a lone LF is kept
/// as data. A run of CRs inside the line is kept as a single CR, and CRs
/// directly before the terminator are dropped. Returns `None` if the stream
/// ends first.
async fn read_line<R>(reader: &mut R) -> io::Result<Option<Vec<u8>>>
where
	R: AsyncBufRead + Unpin,
{
	let mut line = Vec::new();
	loop {
		let (used, found_lf) = {
			let available = reader.fill_buf().await?;
			if available.is_empty() {
				return Ok(None);
			}
			match memchr::memchr(b'\n', available) {
				Some(pos) => {
					line.extend_from_slice(&available[..=pos]);
					(pos + 1, true)
				}
				None => {
					line.extend_from_slice(available);
					(available.len(), false)
				}
			}
		};
		reader.consume(used);

		// The CR may have arrived at the end of the previous chunk.
		if found_lf && line.ends_with(CRLF) {
			line.truncate(line.len() - CRLF.len());
			collapse_carriage_returns(&mut line);
			return Ok(Some(line));
		}
	}
}

fn collapse_carriage_returns(line: &mut Vec<u8>) {
	if memchr::memchr(b'\r', line).is_none() {
		return;
	}
	while line.last() == Some(&b'\r') {
		line.pop();
	}
	line.dedup_by(|next, kept| *next == b'\r' && *kept == b'\r');
}

async fn read_integer<R>(reader: &mut R) -> io::Result<Result<i64, ProtocolError>>
where
	R: AsyncBufRead + Unpin,
{
	Ok(match read_line(reader).await? {
		Some(line) => parse_integer(&line),
		None => Err(ProtocolError::UnexpectedEof),
	})
}

async fn read_bulk_string<R>(reader: &mut R) -> io::Result<RespValue>
where
	R: AsyncBufRead + Unpin,
{
	let length = match read_integer(reader).await? {
		Ok(NULL_LENGTH) => return Ok(RespValue::BulkString(None)),
		Ok(length) => match usize::try_from(length) {
			Ok(length) => length,
			Err(_) => return Ok(ProtocolError::InvalidLength(length).into()),
		},
		Err(e) => return Ok(e.into()),
	};

	// `take` + `read_to_end` keeps reading until the payload is complete or
	// the stream ends, however the bytes are split across reads.
	let mut data = Vec::with_capacity(length.min(MAX_PREALLOCATION));
	(&mut *reader)
		.take(length as u64)
		.read_to_end(&mut data)
		.await?;
	if data.len() < length {
		return Ok(length_mismatch(length, &data));
	}

	match read_line(reader).await? {
		Some(rest) if rest.is_empty() => Ok(RespValue::BulkString(Some(Bytes::from(data)))),
		Some(rest) => Ok(ProtocolError::BulkLengthMismatch {
			expected: length,
			actual: length + rest.len(),
		}
		.into()),
		None => Ok(length_mismatch(length, &data)),
	}
}

/// The stream ended before the payload and its terminator were complete.
/// If the received bytes contain a CRLF, the peer's own terminator is taken
/// to be the first one.
fn length_mismatch(expected: usize, received: &[u8]) -> RespValue {
	let actual = find_crlf(received).unwrap_or(received.len());
	ProtocolError::BulkLengthMismatch { expected, actual }.into()
}

fn into_text(line: Vec<u8>) -> String {
	String::from_utf8(line).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
