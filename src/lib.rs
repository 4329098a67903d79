//! # seqsock
//!
//! Minimal request/response IPC over Unix `SOCK_SEQPACKET` sockets.
//!
//! A server listens at a filesystem path. A client connects, sends one
//! request, reads one response, and disconnects. The server handles one
//! connection at a time and calls an application [`Handler`] for each
//! request.
//!
//! ## Wire format
//!
//! Every message, in both directions, is a 4-byte little-endian `u32`
//! payload length followed by that many payload bytes. Receivers reject a
//! length above their configured maximum before reading the payload.
//!
//! ## Example
//!
//! ```ignore
//! use seqsock::{Client, Connection, Server, ServerConfig, Status};
//!
//! // Server process
//! let mut server = Server::open("/tmp/echo.sock", ServerConfig::default())?;
//! server.serve(&mut |conn: &mut Connection, request: &[u8]| -> Status {
//!     conn.respond(request).into()
//! })?;
//!
//! // Client process
//! let reply = seqsock::request("/tmp/echo.sock", b"hello", 1024)?;
//! assert_eq!(&reply[..], b"hello");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod transport;

mod client;
mod server;

pub use client::{request, Client};
pub use config::{ClientConfig, ServeMode, ServerConfig};
pub use error::{Result, SeqsockError};
pub use handler::{Handler, ResponseState, Status};
pub use server::{ServeState, Server};
pub use transport::Connection;
