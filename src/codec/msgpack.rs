//! MsgPack codec using `rmp-serde`.
//!
//! Structs are always encoded with `to_vec_named`, i.e. as maps keyed by
//! field name, so a peer can decode them without sharing field order.
//!
//! # Example
//!
//! ```
//! use seqsock::codec::MsgPackCodec;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Reading {
//!     sensor: u32,
//!     value: f64,
//! }
//!
//! let reading = Reading { sensor: 3, value: 21.5 };
//! let encoded = MsgPackCodec::encode(&reading).unwrap();
//! let decoded: Reading = MsgPackCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, reading);
//! ```

use crate::error::Result;

/// MessagePack codec for typed request and response payloads.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map).
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
