//! Command parameters.

use std::fmt;

use bytes::Bytes;

/// One argument of a command request.
///
/// The variant decides how the argument is written on the wire, so callers
/// pick the encoding when they build the request instead of the encoder
/// inspecting values at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
	/// UTF-8 text, written with its byte length
	Str(String),
	/// Raw bytes, written unchanged
	Bytes(Bytes),
	/// Written as `"1"` or `"0"`
	Bool(bool),
	/// Written in base 10
	Int(i64),
	/// Written with the shortest representation that round-trips
	Float(f64),
	/// Written as the null bulk string `$-1\r\n`
	Null,
	/// Any other value, already converted to its string form
	Other(String),
}

impl Param {
	/// Wrap any displayable value.
	pub fn other(value: impl fmt::Display) -> Self {
		Param::Other(value.to_string())
	}
}

impl From<&str> for Param {
	fn from(s: &str) -> Self {
		Param::Str(s.to_owned())
	}
}

impl From<String> for Param {
	fn from(s: String) -> Self {
		Param::Str(s)
	}
}

impl From<&String> for Param {
	fn from(s: &String) -> Self {
		Param::Str(s.clone())
	}
}

impl From<&[u8]> for Param {
	fn from(b: &[u8]) -> Self {
		Param::Bytes(Bytes::copy_from_slice(b))
	}
}

impl From<Vec<u8>> for Param {
	fn from(v: Vec<u8>) -> Self {
		Param::Bytes(Bytes::from(v))
	}
}

impl From<Bytes> for Param {
	fn from(b: Bytes) -> Self {
		Param::Bytes(b)
	}
}

impl From<bool> for Param {
	fn from(b: bool) -> Self {
		Param::Bool(b)
	}
}

impl From<i64> for Param {
	fn from(i: i64) -> Self {
		Param::Int(i)
	}
}

impl From<i32> for Param {
	fn from(i: i32) -> Self {
		Param::Int(i64::from(i))
	}
}

impl From<u32> for Param {
	fn from(i: u32) -> Self {
		Param::Int(i64::from(i))
	}
}

// u64 and usize may not fit in an i64, so they keep their own string form.
impl From<u64> for Param {
	fn from(i: u64) -> Self {
		Param::other(i)
	}
}

impl From<usize> for Param {
	fn from(i: usize) -> Self {
		Param::other(i)
	}
}

impl From<f64> for Param {
	fn from(d: f64) -> Self {
		Param::Float(d)
	}
}

impl<T: Into<Param>> From<Option<T>> for Param {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => Param::Null,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_conversions() {
		assert_eq!(Param::from("key"), Param::Str("key".into()));
		assert_eq!(Param::from(&b"\x00\x01"[..]), Param::Bytes(Bytes::from_static(b"\x00\x01")));
		assert_eq!(Param::from(true), Param::Bool(true));
		assert_eq!(Param::from(7i32), Param::Int(7));
		assert_eq!(Param::from(u64::MAX), Param::Other("18446744073709551615".into()));
		assert_eq!(Param::from(1.5f64), Param::Float(1.5));
	}

	#[test]
	fn test_option_maps_none_to_null() {
		assert_eq!(Param::from(None::<&str>), Param::Null);
		assert_eq!(Param::from(Some(3i64)), Param::Int(3));
	}

	#[test]
	fn test_other_uses_display() {
		struct Section;
		impl fmt::Display for Section {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("keyspace")
			}
		}
		assert_eq!(Param::other(Section), Param::Other("keyspace".into()));
	}
}
