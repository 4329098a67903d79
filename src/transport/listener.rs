//! Listening endpoints.
//!
//! # Example
//!
//! ```ignore
//! use seqsock::transport::{Listener, SocketAddress};
//!
//! let address = SocketAddress::new("/tmp/seqsock.sock")?;
//! let listener = Listener::bind(address, 16, None)?;
//! listener.wait()?;
//! let conn = listener.accept()?;
//! ```

use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::io::{AsRawFd, RawFd};

use socket2::{Domain, Socket, Type};

use super::address::SocketAddress;
use super::connection::Connection;
use super::retry::retry_on_interrupt;
use crate::error::Result;

/// Clamp a requested backlog to what the platform allows.
pub fn clamp_backlog(requested: u32) -> i32 {
    let requested = i32::try_from(requested).unwrap_or(i32::MAX);
    requested.min(libc::SOMAXCONN).max(1)
}

/// A bound, listening seqpacket socket and the file backing it.
///
/// The socket file is removed when the listener is dropped.
#[derive(Debug)]
pub struct Listener {
    socket: Socket,
    address: SocketAddress,
}

impl Listener {
    /// Bind and listen at `address`.
    ///
    /// A file already present at the path is removed first. When `mode` is
    /// given, the socket file's permission bits are set to it after bind.
    pub fn bind(address: SocketAddress, backlog: u32, mode: Option<u32>) -> Result<Self> {
        let sock_addr = address.to_sock_addr()?;
        let socket = Socket::new(Domain::UNIX, Type::SEQPACKET, None)?;

        // Remove old socket if it exists
        if fs::symlink_metadata(address.path()).is_ok() {
            tracing::debug!("Removing stale socket file {}", address.path().display());
            fs::remove_file(address.path())?;
        }

        socket.bind(&sock_addr)?;

        // From here on the file is ours and Drop cleans it up.
        let listener = Self { socket, address };

        if let Some(mode) = mode {
            fs::set_permissions(listener.address.path(), fs::Permissions::from_mode(mode))?;
        }

        listener.socket.listen(clamp_backlog(backlog))?;
        Ok(listener)
    }

    /// Block until a peer connection is pending.
    pub fn wait(&self) -> Result<()> {
        if poll_readable(self.socket.as_raw_fd(), -1)? {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "readiness check returned without a peer",
            )
            .into())
        }
    }

    /// Check, without blocking, whether a peer connection is pending.
    pub fn poll(&self) -> Result<bool> {
        Ok(poll_readable(self.socket.as_raw_fd(), 0)?)
    }

    /// Accept one pending connection, blocking if none is queued.
    pub fn accept(&self) -> Result<Connection> {
        let (socket, _addr) = retry_on_interrupt(|| self.socket.accept())?;
        Ok(Connection::from_socket(socket))
    }

    /// The address this listener is bound to.
    pub fn address(&self) -> &SocketAddress {
        &self.address
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        // Clean up socket file when listener is dropped
        let _ = fs::remove_file(self.address.path());
    }
}

/// Single-descriptor readiness check.
///
/// `timeout_ms` of -1 blocks indefinitely, 0 returns immediately. Error and
/// hang-up conditions count as ready so the following accept reports them.
fn poll_readable(fd: RawFd, timeout_ms: libc::c_int) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };

    let ready = retry_on_interrupt(|| {
        // SAFETY: `pfd` is a valid, exclusively borrowed pollfd and nfds is 1.
        let rc = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        if rc < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(rc)
        }
    })?;

    Ok(ready > 0)
}
