//! Error types for seqsock.

use thiserror::Error;

/// Main error type for all seqsock operations.
#[derive(Debug, Error)]
pub enum SeqsockError {
    /// I/O error from socket, bind, listen, accept, poll, read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Socket path does not fit in a local socket address.
    #[error("Socket path too long: {length} bytes exceeds maximum {max}")]
    AddressTooLong { length: usize, max: usize },

    /// Declared frame length exceeds the receiver's maximum.
    #[error("Message too large: {length} bytes exceeds maximum {max}")]
    MessageTooLarge { length: u32, max: u32 },

    /// Outgoing payload cannot be described by a 32-bit length prefix.
    #[error("Payload of {0} bytes cannot be framed")]
    PayloadTooLarge(usize),

    /// Peer closed the connection in the middle of a frame.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Invalid server or client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// MsgPack serialization error.
    #[error("MsgPack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),

    /// MsgPack deserialization error.
    #[error("MsgPack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}

impl SeqsockError {
    /// Check if this is the "message too large" framing condition.
    #[inline]
    pub fn is_message_too_large(&self) -> bool {
        matches!(self, SeqsockError::MessageTooLarge { .. })
    }

    /// The underlying I/O error kind, if this is a transport failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            SeqsockError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Result type alias using SeqsockError.
pub type Result<T> = std::result::Result<T, SeqsockError>;
