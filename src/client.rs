//! Client side: one connection per request.
//!
//! Each [`Client::request`] opens a fresh connection, sends the request
//! frame, reads exactly one response frame and closes the connection.
//!
//! # Example
//!
//! ```ignore
//! use seqsock::Client;
//!
//! let client = Client::new("/tmp/echo.sock")?.max_response_size(1024);
//! let reply = client.request(b"ping")?;
//! assert_eq!(&reply[..], b"pong\0");
//! ```

use std::path::Path;
use std::time::Instant;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::MsgPackCodec;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{Connection, SocketAddress};

/// Handle for issuing requests to the server at one address.
///
/// Holds no connection between requests, so it can be kept around freely.
#[derive(Debug, Clone)]
pub struct Client {
    address: SocketAddress,
    config: ClientConfig,
}

impl Client {
    /// Create a client for the server at `path` with default settings.
    ///
    /// Fails with an address error if the path is too long.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(path, ClientConfig::default())
    }

    /// Create a client with an explicit configuration.
    pub fn with_config(path: impl AsRef<Path>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            address: SocketAddress::new(path)?,
            config,
        })
    }

    /// Set the largest response payload accepted.
    pub fn max_response_size(mut self, size: u32) -> Self {
        self.config.max_response_size = size;
        self
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The server address requests go to.
    pub fn address(&self) -> &SocketAddress {
        &self.address
    }

    /// Perform one request/response exchange.
    ///
    /// The returned payload may be empty (a handler that did not respond).
    /// Responses over the configured maximum fail with
    /// [`SeqsockError::MessageTooLarge`](crate::SeqsockError::MessageTooLarge).
    pub fn request(&self, payload: &[u8]) -> Result<Bytes> {
        let started = Instant::now();
        let mut conn = Connection::connect(&self.address)?;

        conn.send_frame(payload)?;
        let response = conn.recv_frame(self.config.max_response_size)?;

        tracing::debug!(
            path = %self.address.path().display(),
            request_len = payload.len(),
            response_len = response.payload_len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Request complete"
        );

        Ok(response.into_payload())
    }

    /// Send a MsgPack-encoded request and decode the MsgPack response.
    pub fn request_msgpack<T, R>(&self, request: &T) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let data = MsgPackCodec::encode(request)?;
        let response = self.request(&data)?;
        MsgPackCodec::decode(&response)
    }
}

/// One-shot request to the server at `path`.
///
/// Equivalent to building a [`Client`] with `max_response_len` and calling
/// [`Client::request`] once.
pub fn request(path: impl AsRef<Path>, payload: &[u8], max_response_len: u32) -> Result<Bytes> {
    Client::new(path)?
        .max_response_size(max_response_len)
        .request(payload)
}
