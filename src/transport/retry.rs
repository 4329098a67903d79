//! Interruption-safe I/O primitives.
//!
//! Every blocking call made by this crate goes through [`retry_on_interrupt`],
//! so a signal delivered mid-call is never surfaced as an error. On top of
//! that, [`read_exact`] and [`write_exact`] loop until the full buffer has
//! been transferred or a genuine failure occurs.

use std::io::{self, Read, Write};

use crate::error::{Result, SeqsockError};

/// Run `op` until it returns something other than `ErrorKind::Interrupted`.
pub fn retry_on_interrupt<T, F>(mut op: F) -> io::Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    loop {
        match op() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Fill `buf` completely from `reader`.
///
/// A zero-byte read before the buffer is full means the peer went away and
/// yields [`SeqsockError::ConnectionClosed`]. Any other failure aborts the
/// loop immediately.
pub fn read_exact<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;

    while filled < buf.len() {
        let n = retry_on_interrupt(|| reader.read(&mut buf[filled..]))?;
        if n == 0 {
            return Err(SeqsockError::ConnectionClosed);
        }
        filled += n;
    }

    Ok(())
}

/// Write all of `buf` to `writer`, advancing by however much each call accepts.
pub fn write_exact<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let mut remaining = buf;

    while !remaining.is_empty() {
        let n = retry_on_interrupt(|| writer.write(remaining))?;
        if n == 0 {
            return Err(SeqsockError::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                "peer accepted zero bytes",
            )));
        }
        remaining = &remaining[n..];
    }

    Ok(())
}
