//! Handler module - request callbacks and response tracking.
//!
//! Provides:
//! - [`Handler`] - the single capability a server is built around
//! - [`Status`] - the integer outcome a handler reports
//! - [`ResponseState`] - per-connection "already responded" flag
//!
//! Any `FnMut(&mut Connection, &[u8]) -> Status` closure is a handler.
//!
//! # Example
//!
//! ```ignore
//! use seqsock::{Connection, Status};
//!
//! let mut echo = |conn: &mut Connection, request: &[u8]| -> Status {
//!     conn.respond(request).into()
//! };
//!
//! let status = server.process_one(&mut echo)?;
//! ```

mod response;
mod status;

pub use response::ResponseState;
pub use status::Status;

use crate::server::ServeState;
use crate::transport::Connection;

/// Application-supplied request handler.
///
/// `handle` runs once per accepted connection with the full request
/// payload. It may answer through [`Connection::respond`]; if it does not,
/// the server sends an empty response on its behalf.
pub trait Handler {
    /// Handle one request.
    fn handle(&mut self, conn: &mut Connection, request: &[u8]) -> Status;

    /// Loop state for the next iteration of [`Server::serve`](crate::Server::serve).
    ///
    /// Called after every processed connection with the state that governed
    /// it. The default keeps the state unchanged.
    fn next_state(&mut self, current: ServeState) -> ServeState {
        current
    }
}

impl<F> Handler for F
where
    F: FnMut(&mut Connection, &[u8]) -> Status,
{
    fn handle(&mut self, conn: &mut Connection, request: &[u8]) -> Status {
        self(conn, request)
    }
}
