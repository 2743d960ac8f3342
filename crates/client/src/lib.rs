//! # Client - Redis sessions over RESP
//!
//! A [`Session`] owns one [`Transport`] plus one encoder and decoder from
//! the `resp` crate. Commands are written with [`Session::send`] and their
//! replies read back in order with [`Session::read_response`]. The typed
//! helpers in [`response`] turn a reply into the value a command produces,
//! and [`commands`] adds per-command methods on top of both.
//!
//! ## Example
//!
//! ```no_run
//! use client::ClientConfig;
//! use client::Session;
//! use client::SetOptions;
//!
//! # async fn run() -> Result<(), client::ClientError> {
//! let mut session = Session::connect(ClientConfig::default()).await?;
//! session.set("greeting", "hello", &SetOptions::default()).await?;
//! let value = session.get("greeting").await?;
//! assert_eq!(value.as_deref(), Some(&b"hello"[..]));
//!
//! // Pipelining: several sends, then the replies in the same order
//! session.send_incr("counter").await?;
//! session.send_incr("counter").await?;
//! let first = session.read_response().await;
//! let second = session.read_response().await;
//! # let _ = (first, second);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
mod connection;
mod error;
pub mod response;
mod session;

pub use commands::InfoSection;
pub use commands::SetCondition;
pub use commands::SetOptions;
pub use config::ClientConfig;
pub use config::ConfigError;
pub use connection::TcpConnection;
pub use connection::Transport;
pub use error::ClientError;
pub use resp::Param;
pub use resp::RespValue;
pub use session::Session;
