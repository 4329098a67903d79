//! Frame send and receive.
//!
//! A frame goes out as two writes: the 4-byte header, then the payload.
//! On a seqpacket socket each write is its own record, which is what lets
//! the receiver read exactly [`HEADER_SIZE`] bytes without truncating
//! anything. An empty payload produces no second record.
//!
//! # Example
//!
//! ```
//! use seqsock::protocol::{recv_frame, send_frame};
//! use std::io::Cursor;
//!
//! let mut wire = Vec::new();
//! send_frame(&mut wire, b"ping").unwrap();
//!
//! let frame = recv_frame(&mut Cursor::new(wire), 4096).unwrap();
//! assert_eq!(frame.payload(), b"ping");
//! ```

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};

use super::wire_format::{Header, HEADER_SIZE};
use crate::error::Result;
use crate::transport::{read_exact, write_exact};

/// A received protocol frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Payload bytes; its length always equals the header's length.
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame from payload bytes.
    pub fn new(payload: Bytes) -> Self {
        Self { payload }
    }

    /// Create a frame by copying `payload`.
    pub fn from_slice(payload: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(payload))
    }

    /// Header describing this frame.
    ///
    /// Received frames always fit in 32 bits, so this never saturates for
    /// them.
    pub fn header(&self) -> Header {
        Header::new(u32::try_from(self.payload.len()).unwrap_or(u32::MAX))
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Consume the frame, returning its payload.
    #[inline]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

/// Write one frame carrying `payload`.
///
/// Fails if the payload cannot be described by a u32 header or if either
/// write fails.
pub fn send_frame<W: Write + ?Sized>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let header = Header::for_payload(payload)?;

    write_exact(writer, &header.encode())?;
    write_exact(writer, payload)?;

    tracing::trace!(length = header.payload_length, "frame sent");
    Ok(())
}

/// Read one frame whose payload may be at most `max_len` bytes.
///
/// The header is checked before anything else is read: an oversized frame
/// fails with [`SeqsockError::MessageTooLarge`](crate::SeqsockError::MessageTooLarge)
/// and leaves the payload unread. The payload buffer is sized exactly to
/// the validated length.
pub fn recv_frame<R: Read + ?Sized>(reader: &mut R, max_len: u32) -> Result<Frame> {
    let mut raw = [0u8; HEADER_SIZE];
    read_exact(reader, &mut raw)?;

    let header = Header::decode(raw);
    header.validate(max_len)?;

    let mut payload = BytesMut::zeroed(header.payload_len());
    read_exact(reader, &mut payload)?;

    tracing::trace!(length = header.payload_length, "frame received");
    Ok(Frame::new(payload.freeze()))
}
