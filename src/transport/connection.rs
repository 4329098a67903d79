//! Connection endpoints.
//!
//! A [`Connection`] owns exactly one connected seqpacket socket and carries
//! exactly one request/response exchange. Dropping it closes the socket.

use serde::Serialize;
use socket2::{Domain, Socket, Type};

use super::address::SocketAddress;
use super::retry::retry_on_interrupt;
use crate::codec::MsgPackCodec;
use crate::error::Result;
use crate::handler::ResponseState;
use crate::protocol::{self, Frame};

/// A connected seqpacket socket plus its response state.
#[derive(Debug)]
pub struct Connection {
    socket: Socket,
    response: ResponseState,
}

impl Connection {
    /// Wrap an already-connected socket.
    pub(crate) fn from_socket(socket: Socket) -> Self {
        Self {
            socket,
            response: ResponseState::default(),
        }
    }

    /// Open a connection to the server listening at `address`.
    pub(crate) fn connect(address: &SocketAddress) -> Result<Self> {
        let sock_addr = address.to_sock_addr()?;
        let socket = Socket::new(Domain::UNIX, Type::SEQPACKET, None)?;

        retry_on_interrupt(|| socket.connect(&sock_addr))?;

        Ok(Self::from_socket(socket))
    }

    #[cfg(test)]
    pub(crate) fn pair() -> Result<(Self, Self)> {
        let (a, b) = Socket::pair(Domain::UNIX, Type::SEQPACKET, None)?;
        Ok((Self::from_socket(a), Self::from_socket(b)))
    }

    /// Send one frame.
    ///
    /// Any frame written on a connection is its response, so the connection
    /// is marked as responded even if the write fails part-way.
    pub(crate) fn send_frame(&mut self, payload: &[u8]) -> Result<()> {
        let result = protocol::send_frame(&mut self.socket, payload);
        self.mark_sent();
        result
    }

    /// Receive one frame of at most `max_len` payload bytes.
    pub(crate) fn recv_frame(&mut self, max_len: u32) -> Result<Frame> {
        protocol::recv_frame(&mut self.socket, max_len)
    }

    /// Send the response to the current request.
    ///
    /// This is the only way a handler produces output. A torn frame cannot
    /// be followed by a clean empty one, so a failed write still counts as
    /// the response. Calling it twice transmits twice; the peer only reads
    /// the first.
    pub fn respond(&mut self, payload: &[u8]) -> Result<()> {
        self.send_frame(payload)
    }

    /// Serialize `value` with MsgPack and send it as the response.
    pub fn respond_msgpack<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let data = MsgPackCodec::encode(value)?;
        self.respond(&data)
    }

    /// Check whether a response has been sent for the current request.
    #[inline]
    pub fn is_sent(&self) -> bool {
        self.response.is_sent()
    }

    /// Current response state.
    #[inline]
    pub fn response_state(&self) -> ResponseState {
        self.response
    }

    /// Reset the response state before a handler runs.
    #[inline]
    pub(crate) fn mark_unsent(&mut self) {
        self.response.mark_unsent();
    }

    #[inline]
    pub(crate) fn mark_sent(&mut self) {
        self.response.mark_sent();
    }
}
