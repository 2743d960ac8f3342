//! # RESP - Redis Serialization Protocol Library
//!
//! The codec underneath the client: an encoder that turns a command and its
//! parameters into a RESP array of bulk strings, and a streaming decoder that
//! reads exactly one reply at a time from an async byte stream.
//!
//! ## Features
//!
//! - **Exact framing**: bulk string lengths are UTF-8 byte counts, and the
//!   decoder consumes precisely the bytes of one reply
//! - **Explicit nulls**: `$-1` and `*-1` decode to `None`, never to empty values
//! - **Errors as data**: malformed replies come back as
//!   [`RespValue::ProtocolError`]; only I/O failures are returned as `Err`
//!
//! ## Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use resp::RespValue;
//!
//! let mut buf = BytesMut::new();
//! resp::encode_command(&mut buf, "Get", &["AKey".into()]).unwrap();
//! assert_eq!(&buf[..], b"*2\r\n$3\r\nGet\r\n$4\r\nAKey\r\n");
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut reply: &[u8] = b"*2\r\n:1\r\n:2\r\n";
//! let value = resp::read_value(&mut reply).await.unwrap();
//! assert_eq!(
//!     value,
//!     Some(RespValue::array(vec![RespValue::integer(1), RespValue::integer(2)]))
//! );
//! # });
//! ```

mod decode;
mod encode;
mod error;
mod param;
mod types;
mod utils;

pub use decode::Decoder;
pub use decode::read_value;
pub use encode::Encoder;
pub use encode::RespEncoder;
pub use encode::encode_command;
pub use error::EncodeError;
pub use error::ProtocolError;
pub use error::WriteError;
pub use param::Param;
pub use types::RespValue;
