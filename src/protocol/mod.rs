//! Protocol module - wire format and frame I/O.
//!
//! This module implements the framing used in both directions:
//! - 4-byte Little Endian length header encoding/decoding
//! - Frame send/receive over any `Read`/`Write` with a size limit checked
//!   before the payload is read

mod frame;
mod wire_format;

pub use frame::{recv_frame, send_frame, Frame};
pub use wire_format::{decode_header, encode_header, Header, DEFAULT_MAX_MESSAGE_SIZE, HEADER_SIZE};
