//! Codec module - typed payloads on top of the opaque byte protocol.
//!
//! The protocol itself never looks inside a payload. [`MsgPackCodec`] is an
//! optional layer for handlers and clients that exchange serde types; see
//! [`Connection::respond_msgpack`](crate::Connection::respond_msgpack) and
//! [`Client::request_msgpack`](crate::Client::request_msgpack).

mod msgpack;

pub use msgpack::MsgPackCodec;
