//! crates/probelog-sink/src/stream.rs
//!
//! Borrowed file-descriptor handles and the single-`writev` write primitive.
//!
//! This is the only module in the crate that talks to libc directly. Every
//! write is issued as exactly one `writev(2)` call carrying a single iovec and
//! the return value is discarded: the logging path runs from code that is
//! usually already failing, so a short write, `EPIPE`, or `ENOSPC` must never
//! turn into a second failure.

#![allow(unsafe_code)]

use std::fmt;
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, RawFd};

/// Handle to a destination that accepts raw message bytes.
///
/// The handle borrows the descriptor; opening, rotating, and closing the
/// underlying file stays with whoever owns it. The `'fd` lifetime ties the
/// handle to that owner so a [`LogStream`] can never outlive the descriptor it
/// points at.
///
/// # Examples
///
/// ```
/// use probelog_sink::LogStream;
///
/// let file = tempfile::tempfile()?;
/// let stream = LogStream::from_handle(&file);
/// stream.write_best_effort(b"probe attached\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct LogStream<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> LogStream<'fd> {
    /// Wraps an already borrowed descriptor.
    #[must_use]
    pub const fn new(fd: BorrowedFd<'fd>) -> Self {
        Self { fd }
    }

    /// Borrows the descriptor of any handle implementing [`AsFd`] (files,
    /// pipes, sockets).
    #[must_use]
    pub fn from_handle<H>(handle: &'fd H) -> Self
    where
        H: AsFd + ?Sized,
    {
        Self::new(handle.as_fd())
    }

    /// Returns the raw descriptor number.
    #[must_use]
    pub fn raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }

    /// Writes `bytes` with a single `writev(2)` call and ignores the result.
    ///
    /// The call is not retried on `EINTR` or on a short write.
    pub fn write_best_effort(&self, bytes: &[u8]) {
        let iov = [libc::iovec {
            iov_base: bytes.as_ptr().cast_mut().cast::<libc::c_void>(),
            iov_len: bytes.len(),
        }];

        // SAFETY: `iov` points at `bytes`, which stays borrowed for the whole
        // call, and the descriptor is kept open by the `'fd` borrow. writev
        // only reads from the iovec buffers.
        let _ = unsafe { libc::writev(self.fd.as_raw_fd(), iov.as_ptr(), 1) };
    }
}

impl LogStream<'static> {
    /// Returns a handle to the process's standard output (descriptor 1).
    ///
    /// Bypasses [`std::io::Stdout`] and its line buffer and lock, so bytes
    /// reach the descriptor in one kernel-level write.
    #[must_use]
    pub const fn stdout() -> Self {
        // SAFETY: descriptor 1 is opened by the loader before `main` and the
        // standard library itself treats it as valid for the life of the
        // process.
        Self::new(unsafe { BorrowedFd::borrow_raw(libc::STDOUT_FILENO) })
    }
}

impl AsFd for LogStream<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd
    }
}

impl fmt::Debug for LogStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogStream")
            .field("fd", &self.fd.as_raw_fd())
            .finish()
    }
}
