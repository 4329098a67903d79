//! Server engine.
//!
//! A [`Server`] owns one listening endpoint and serves connections strictly
//! one at a time:
//! 1. Wait for (or poll for) a pending peer
//! 2. Accept it and read one request frame
//! 3. Run the handler with the response state reset to "unsent"
//! 4. Send an empty response if the handler did not respond
//! 5. Close the connection
//!
//! # Example
//!
//! ```ignore
//! use seqsock::{Connection, Server, ServerConfig, Status};
//!
//! let mut server = Server::open("/tmp/echo.sock", ServerConfig::default())?;
//!
//! loop {
//!     server.wait()?;
//!     let status = server.process_one(&mut |conn: &mut Connection, request: &[u8]| -> Status {
//!         conn.respond(request).into()
//!     })?;
//! }
//! ```

use std::path::Path;
use std::time::Instant;

use crate::config::{ServeMode, ServerConfig};
use crate::error::Result;
use crate::handler::{Handler, Status};
use crate::transport::{Listener, SocketAddress};

/// State carried from one serve-loop iteration to the next.
///
/// [`Server::serve`] hands the current state to
/// [`Handler::next_state`] after every connection and uses the returned
/// value for the following iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServeState {
    /// Readiness strategy for the next iteration.
    pub mode: ServeMode,
    /// Stop before the next readiness check.
    pub shutdown: bool,
}

impl ServeState {
    /// Running state with the given mode.
    pub fn new(mode: ServeMode) -> Self {
        Self {
            mode,
            shutdown: false,
        }
    }

    /// Same state, with shutdown requested.
    pub fn stop(self) -> Self {
        Self {
            shutdown: true,
            ..self
        }
    }

    /// Same state, with a different mode.
    pub fn with_mode(self, mode: ServeMode) -> Self {
        Self { mode, ..self }
    }
}

/// A listening server.
#[derive(Debug)]
pub struct Server {
    listener: Listener,
    config: ServerConfig,
}

impl Server {
    /// Open a server at `path`.
    ///
    /// Fails with an address error if the path is too long, before any
    /// socket is created; otherwise with the bind/listen I/O error.
    pub fn open(path: impl AsRef<Path>, config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let address = SocketAddress::new(path)?;
        let listener = Listener::bind(address, config.backlog, config.socket_mode)?;

        tracing::info!(
            path = %listener.address().path().display(),
            max_message_size = config.max_message_size,
            "Server listening"
        );

        Ok(Self { listener, config })
    }

    /// The server's configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Filesystem path of the listening socket.
    pub fn path(&self) -> &Path {
        self.listener.address().path()
    }

    /// Block until a peer connection is pending.
    pub fn wait(&self) -> Result<()> {
        self.listener.wait()
    }

    /// Check, without blocking, whether a peer connection is pending.
    pub fn poll(&self) -> Result<bool> {
        self.listener.poll()
    }

    /// Accept and fully serve one connection.
    ///
    /// Returns the handler's status, or an error if accepting, reading the
    /// request, or sending the automatic empty response failed. The
    /// connection is closed on every path.
    pub fn process_one<H: Handler + ?Sized>(&mut self, handler: &mut H) -> Result<Status> {
        let started = Instant::now();
        let mut conn = self.listener.accept()?;

        let request = conn.recv_frame(self.config.max_message_size)?;

        conn.mark_unsent();
        let status = handler.handle(&mut conn, request.payload());

        if !conn.is_sent() {
            tracing::trace!("Handler did not respond, sending empty response");
            conn.respond(&[])?;
        }

        tracing::debug!(
            request_len = request.payload_len(),
            status = status.code(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Request processed"
        );

        Ok(status)
    }

    /// Serve connections until the handler requests shutdown.
    ///
    /// The loop starts in the configured [`ServeMode`]. After every
    /// connection the handler's [`Handler::next_state`] decides the mode and
    /// whether to stop. Handler failures and per-connection protocol errors
    /// are logged and the loop continues; a failing readiness check ends it.
    pub fn serve<H: Handler + ?Sized>(&mut self, handler: &mut H) -> Result<()> {
        let mut state = ServeState::new(self.config.serve_mode);

        while !state.shutdown {
            self.await_peer(state.mode)?;

            match self.process_one(handler) {
                Ok(status) if status.is_failure() => {
                    tracing::warn!("Handler failed with status {}", status);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Connection failed: {}", e);
                }
            }

            state = handler.next_state(state);
        }

        tracing::info!(path = %self.path().display(), "Server shutting down");
        Ok(())
    }

    fn await_peer(&self, mode: ServeMode) -> Result<()> {
        match mode.poll_interval() {
            None => self.wait(),
            Some(interval) => {
                while !self.poll()? {
                    std::thread::sleep(interval);
                }
                Ok(())
            }
        }
    }

    /// Close the listening socket and remove its file.
    pub fn close(self) {
        tracing::info!(path = %self.path().display(), "Server closed");
        drop(self.listener);
    }
}
