//! Handler status codes.

use std::fmt;

use crate::error::Result;

/// Integer status returned by a request handler.
///
/// Negative values are application failures. The server hands the status
/// back to its caller verbatim, whether or not a response was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Status(pub i32);

impl Status {
    /// Success.
    pub const OK: Status = Status(0);

    /// Generic application failure.
    pub const FAILURE: Status = Status(-1);

    /// Raw status code.
    #[inline]
    pub fn code(self) -> i32 {
        self.0
    }

    /// Check if this status reports a failure (negative code).
    #[inline]
    pub fn is_failure(self) -> bool {
        self.0 < 0
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Status(code)
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.0
    }
}

/// Lets a handler return the outcome of `respond` directly.
impl From<Result<()>> for Status {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Status::OK,
            Err(e) => {
                tracing::debug!("Response failed: {}", e);
                Status::FAILURE
            }
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
