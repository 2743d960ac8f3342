use bytes::Bytes;
use resp::Param;
use resp::RespValue;

use super::ensure_key;
use super::expect_present_array;
use super::key_params;
use super::parse_bulk;
use crate::ClientError;
use crate::Session;
use crate::Transport;
use crate::response::expect_bit;
use crate::response::expect_bulk_string;
use crate::response::expect_integer;
use crate::response::expect_ok;

/// When `SET` is allowed to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetCondition {
	#[default]
	Always,
	/// `XX`
	IfExists,
	/// `NX`
	IfNotExists,
}

/// Optional arguments of `SET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
	/// `EX seconds`
	pub expire_seconds: Option<i64>,
	/// `PX milliseconds`
	pub expire_milliseconds: Option<i64>,
	pub condition: SetCondition,
}

impl SetOptions {
	fn append_to(&self, params: &mut Vec<Param>) {
		if let Some(seconds) = self.expire_seconds {
			params.push("EX".into());
			params.push(seconds.into());
		}
		if let Some(ms) = self.expire_milliseconds {
			params.push("PX".into());
			params.push(ms.into());
		}
		match self.condition {
			SetCondition::Always => {}
			SetCondition::IfExists => params.push("XX".into()),
			SetCondition::IfNotExists => params.push("NX".into()),
		}
	}
}

impl<T: Transport> Session<T> {
	pub async fn send_append(&mut self, key: &str, value: impl Into<Param>) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Append", &[key.into(), value.into()]).await
	}

	/// Length of the string after the append
	pub async fn append(&mut self, key: &str, value: impl Into<Param>) -> Result<i64, ClientError> {
		self.send_append(key, value).await?;
		expect_integer(self.read_response().await)
	}

	/// Count set bits, optionally within the byte range `start..=end`.
	///
	/// An `end` without a `start` counts from byte 0.
	pub async fn send_bitcount(
		&mut self,
		key: &str,
		start: Option<i64>,
		end: Option<i64>,
	) -> Result<(), ClientError> {
		ensure_key(key)?;
		let start = if end.is_some() { start.or(Some(0)) } else { start };

		let mut params = vec![Param::from(key)];
		params.extend(start.map(Param::from));
		params.extend(end.map(Param::from));
		self.send("BitCount", &params).await
	}

	pub async fn bitcount(&mut self, key: &str, start: Option<i64>, end: Option<i64>) -> Result<i64, ClientError> {
		self.send_bitcount(key, start, end).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_decr(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Decr", &[key.into()]).await
	}

	pub async fn decr(&mut self, key: &str) -> Result<i64, ClientError> {
		self.send_decr(key).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_decr_by(&mut self, key: &str, decrement: i64) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("DecrBy", &[key.into(), decrement.into()]).await
	}

	pub async fn decr_by(&mut self, key: &str, decrement: i64) -> Result<i64, ClientError> {
		self.send_decr_by(key, decrement).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_get(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Get", &[key.into()]).await
	}

	/// `None` when the key does not exist
	pub async fn get(&mut self, key: &str) -> Result<Option<Bytes>, ClientError> {
		self.send_get(key).await?;
		expect_bulk_string(self.read_response().await)
	}

	pub async fn send_get_set(&mut self, key: &str, value: impl Into<Param>) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("GetSet", &[key.into(), value.into()]).await
	}

	/// Store `value` and return the previous one
	pub async fn get_set(&mut self, key: &str, value: impl Into<Param>) -> Result<Option<Bytes>, ClientError> {
		self.send_get_set(key, value).await?;
		expect_bulk_string(self.read_response().await)
	}

	pub async fn send_incr(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("Incr", &[key.into()]).await
	}

	pub async fn incr(&mut self, key: &str) -> Result<i64, ClientError> {
		self.send_incr(key).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_incr_by(&mut self, key: &str, increment: i64) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("IncrBy", &[key.into(), increment.into()]).await
	}

	pub async fn incr_by(&mut self, key: &str, increment: i64) -> Result<i64, ClientError> {
		self.send_incr_by(key, increment).await?;
		expect_integer(self.read_response().await)
	}

	pub async fn send_incr_by_float(&mut self, key: &str, increment: f64) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("IncrByFloat", &[key.into(), increment.into()]).await
	}

	pub async fn incr_by_float(&mut self, key: &str, increment: f64) -> Result<f64, ClientError> {
		self.send_incr_by_float(key, increment).await?;
		parse_bulk(self.read_response().await)
	}

	pub async fn send_mget(&mut self, keys: &[&str]) -> Result<(), ClientError> {
		let params = key_params(keys)?;
		self.send("MGet", &params).await
	}

	/// One entry per key, `None` for missing keys
	pub async fn mget(&mut self, keys: &[&str]) -> Result<Vec<Option<Bytes>>, ClientError> {
		self.send_mget(keys).await?;
		expect_present_array(self.read_response().await)?
			.into_iter()
			.map(expect_bulk_string)
			.collect()
	}

	pub async fn send_set(
		&mut self,
		key: &str,
		value: impl Into<Param>,
		options: &SetOptions,
	) -> Result<(), ClientError> {
		ensure_key(key)?;
		let mut params = vec![Param::from(key), value.into()];
		options.append_to(&mut params);
		self.send("Set", &params).await
	}

	/// `false` when a condition in `options` prevented the write
	pub async fn set(
		&mut self,
		key: &str,
		value: impl Into<Param>,
		options: &SetOptions,
	) -> Result<bool, ClientError> {
		self.send_set(key, value, options).await?;
		match self.read_response().await {
			RespValue::BulkString(None) => Ok(false),
			other => expect_ok(other).map(|()| true),
		}
	}

	pub async fn send_set_nx(&mut self, key: &str, value: impl Into<Param>) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("SetNX", &[key.into(), value.into()]).await
	}

	/// `true` when the key was set
	pub async fn set_nx(&mut self, key: &str, value: impl Into<Param>) -> Result<bool, ClientError> {
		self.send_set_nx(key, value).await?;
		expect_bit(self.read_response().await)
	}

	pub async fn send_strlen(&mut self, key: &str) -> Result<(), ClientError> {
		ensure_key(key)?;
		self.send("StrLen", &[key.into()]).await
	}

	pub async fn strlen(&mut self, key: &str) -> Result<i64, ClientError> {
		self.send_strlen(key).await?;
		expect_integer(self.read_response().await)
	}
}
