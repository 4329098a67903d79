//! Wire format encoding and decoding.
//!
//! Every message in either direction is one frame:
//! ```text
//! ┌──────────────────┬──────────────────────────┐
//! │ Payload length   │ Payload                  │
//! │ 4 bytes          │ `length` bytes, opaque   │
//! │ uint32 LE        │                          │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! The length is always Little Endian, whatever the host byte order.

use crate::error::{Result, SeqsockError};

/// Header size in bytes (fixed, exactly 4).
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload size accepted by a receiver (4 KiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: u32 = 4096;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Payload length in bytes.
    pub payload_length: u32,
}

impl Header {
    /// Create a header announcing `payload_length` bytes.
    pub fn new(payload_length: u32) -> Self {
        Self { payload_length }
    }

    /// Create a header for `payload`.
    ///
    /// Fails with [`SeqsockError::PayloadTooLarge`] if the payload length
    /// does not fit in 32 bits.
    pub fn for_payload(payload: &[u8]) -> Result<Self> {
        let payload_length =
            u32::try_from(payload.len()).map_err(|_| SeqsockError::PayloadTooLarge(payload.len()))?;
        Ok(Self::new(payload_length))
    }

    /// Encode header to bytes (Little Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use seqsock::protocol::Header;
    ///
    /// assert_eq!(Header::new(0x0102_0304).encode(), [0x04, 0x03, 0x02, 0x01]);
    /// ```
    #[inline]
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        self.payload_length.to_le_bytes()
    }

    /// Decode header from bytes (Little Endian).
    #[inline]
    pub fn decode(buf: [u8; HEADER_SIZE]) -> Self {
        Self::new(u32::from_le_bytes(buf))
    }

    /// Check the announced length against the receiver's maximum.
    pub fn validate(&self, max_payload_size: u32) -> Result<()> {
        if self.payload_length > max_payload_size {
            return Err(SeqsockError::MessageTooLarge {
                length: self.payload_length,
                max: max_payload_size,
            });
        }
        Ok(())
    }

    /// Payload length as a buffer size.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload_length as usize
    }
}

/// Encode a payload length as a header (standalone function).
#[inline]
pub fn encode_header(length: u32) -> [u8; HEADER_SIZE] {
    Header::new(length).encode()
}

/// Decode a header into a payload length (standalone function).
#[inline]
pub fn decode_header(buf: [u8; HEADER_SIZE]) -> u32 {
    Header::decode(buf).payload_length
}
