//! Configuration types for servers and clients.
//!
//! Both configs deserialize with every field optional, so an embedding
//! application can keep them in its own config file:
//!
//! ```
//! use seqsock::{ServeMode, ServerConfig};
//!
//! let config: ServerConfig = serde_json::from_str(
//!     r#"{ "socket_mode": 432, "serve_mode": { "kind": "polling", "interval_ms": 2 } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.max_message_size, 4096);
//! assert_eq!(config.serve_mode, ServeMode::Polling { interval_ms: 2 });
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqsockError};
use crate::protocol::DEFAULT_MAX_MESSAGE_SIZE;

/// Default listen backlog (clamped to `SOMAXCONN` at bind time).
pub const DEFAULT_BACKLOG: u32 = 16;

/// Default sleep between readiness polls in [`ServeMode::Polling`].
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2;

/// How [`Server::serve`](crate::Server::serve) waits for the next peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServeMode {
    /// Block in the readiness check until a peer connects.
    #[default]
    Blocking,
    /// Poll without blocking, sleeping `interval_ms` between attempts.
    Polling {
        /// Milliseconds to sleep after a "not ready" poll.
        interval_ms: u64,
    },
}

impl ServeMode {
    /// Polling mode with the default interval.
    pub fn polling() -> Self {
        ServeMode::Polling {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Sleep between polls, if this is polling mode.
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            ServeMode::Blocking => None,
            ServeMode::Polling { interval_ms } => Some(Duration::from_millis(*interval_ms)),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Largest request payload accepted, in bytes.
    pub max_message_size: u32,
    /// Listen backlog.
    pub backlog: u32,
    /// Permission bits for the socket file, applied after bind.
    pub socket_mode: Option<u32>,
    /// Initial readiness strategy for the serve loop.
    pub serve_mode: ServeMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            backlog: DEFAULT_BACKLOG,
            socket_mode: None,
            serve_mode: ServeMode::Blocking,
        }
    }
}

impl ServerConfig {
    /// Check the configuration for values the server cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.backlog == 0 {
            return Err(SeqsockError::Config("backlog must be at least 1".to_string()));
        }

        if let Some(mode) = self.socket_mode {
            if mode & !0o7777 != 0 {
                return Err(SeqsockError::Config(format!(
                    "socket mode {:o} has bits outside 0o7777",
                    mode
                )));
            }
        }

        Ok(())
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Largest response payload accepted, in bytes.
    pub max_response_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_response_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Check the configuration. Every value is currently usable.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
