//! Transport module - local seqpacket sockets.
//!
//! Provides:
//! - Interruption-retrying I/O primitives ([`read_exact`], [`write_exact`])
//! - Validated socket paths ([`SocketAddress`])
//! - Listening and connection endpoints ([`Listener`], [`Connection`])

mod address;
mod connection;
mod listener;
mod retry;

pub use address::{SocketAddress, MAX_ADDRESS_LEN};
pub use connection::Connection;
pub use listener::{clamp_backlog, Listener};
pub use retry::{read_exact, retry_on_interrupt, write_exact};

#[cfg(test)]
pub(crate) use retry::testing;
