//! Local socket addresses.
//!
//! A [`SocketAddress`] is a filesystem path that has already been checked
//! against the platform's `sun_path` capacity, so constructing one is the
//! point where "path too long" is reported, before any socket exists.

use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use socket2::SockAddr;

use crate::error::{Result, SeqsockError};

/// Size of `sockaddr_un::sun_path`, including the trailing NUL.
#[cfg(any(target_os = "linux", target_os = "android"))]
const SUN_PATH_CAPACITY: usize = 108;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
const SUN_PATH_CAPACITY: usize = 104;

/// Longest path, in bytes, that fits in a local socket address.
pub const MAX_ADDRESS_LEN: usize = SUN_PATH_CAPACITY - 1;

/// A validated filesystem path for a local seqpacket socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketAddress {
    path: PathBuf,
}

impl SocketAddress {
    /// Validate `path` and wrap it.
    ///
    /// Fails with [`SeqsockError::AddressTooLong`] if the raw path bytes
    /// exceed [`MAX_ADDRESS_LEN`].
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let length = path.as_os_str().as_bytes().len();

        if length > MAX_ADDRESS_LEN {
            return Err(SeqsockError::AddressTooLong {
                length,
                max: MAX_ADDRESS_LEN,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The socket's filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the `sockaddr_un` for this path.
    pub(crate) fn to_sock_addr(&self) -> Result<SockAddr> {
        Ok(SockAddr::unix(&self.path)?)
    }
}
