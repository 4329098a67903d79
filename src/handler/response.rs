//! Response-state tracking for one server-side connection.

/// Whether a response frame has gone out on the current connection.
///
/// The server resets it to [`ResponseState::Unsent`] once the request
/// payload has been read, and only the act of sending a response moves it
/// to [`ResponseState::Sent`]. After the handler returns, an `Unsent`
/// connection gets an empty response so every request sees exactly one
/// reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseState {
    /// No response has been transmitted yet.
    #[default]
    Unsent,
    /// A response frame has been transmitted.
    Sent,
}

impl ResponseState {
    /// Reset to "no response sent yet".
    #[inline]
    pub fn mark_unsent(&mut self) {
        *self = ResponseState::Unsent;
    }

    /// Record that a response frame was transmitted.
    #[inline]
    pub fn mark_sent(&mut self) {
        *self = ResponseState::Sent;
    }

    /// Check whether a response was transmitted.
    #[inline]
    pub fn is_sent(&self) -> bool {
        matches!(self, ResponseState::Sent)
    }
}
