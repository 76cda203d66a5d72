//! crates/probelog/src/errno.rs
//! Snapshot of `errno` and its `strerror` text, rendered without allocating.

#![allow(unsafe_code)]

use std::fmt;
use std::io;

/// Size of the stack buffer handed to `strerror_r`. glibc's longest message
/// is well under this.
const STRERROR_BUF_LEN: usize = 128;

/// An `errno` value captured at a specific point.
///
/// [`Display`](fmt::Display) prints the C library's description of the code
/// (`strerror`), e.g. `No such file or directory`. The text is produced with
/// `strerror_r` into a stack buffer, so rendering is thread-safe and does not
/// allocate.
///
/// # Examples
///
/// ```
/// use probelog::Errno;
///
/// let errno = Errno::new(libc::ENOENT);
/// assert_eq!(errno.code(), libc::ENOENT);
/// assert_eq!(errno.to_string(), "No such file or directory");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Errno(i32);

impl Errno {
    /// Wraps a raw error code.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Reads the calling thread's current `errno`.
    ///
    /// Call this before anything else that might issue a system call, or the
    /// value may already be overwritten.
    #[must_use]
    pub fn last() -> Self {
        Self(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    /// Returns the raw error code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }
}

impl From<i32> for Errno {
    fn from(code: i32) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0 as libc::c_char; STRERROR_BUF_LEN];

        // SAFETY: `buf` is a writable array of `STRERROR_BUF_LEN` bytes and
        // that length is passed along. The libc crate binds the XSI variant,
        // which writes a NUL-terminated string into `buf` and returns an int.
        let _ = unsafe { libc::strerror_r(self.0, buf.as_mut_ptr(), buf.len()) };

        let bytes: &[u8] = {
            let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
            // SAFETY: c_char and u8 have the same size and alignment, and
            // `len` never exceeds the array length.
            unsafe { std::slice::from_raw_parts(buf.as_ptr().cast::<u8>(), len) }
        };

        if bytes.is_empty() {
            return write!(f, "Unknown error {}", self.0);
        }

        for chunk in bytes.utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_known_codes() {
        assert_eq!(Errno::new(libc::ENOENT).to_string(), "No such file or directory");
        assert_eq!(Errno::new(libc::EACCES).to_string(), "Permission denied");
    }

    #[test]
    fn unknown_code_still_renders_text() {
        let text = Errno::new(99_999).to_string();
        assert!(!text.is_empty());
        assert!(text.contains("99999") || text.to_ascii_lowercase().contains("unknown"));
    }

    #[test]
    fn last_reads_thread_errno() {
        // SAFETY: closing an invalid descriptor is harmless and sets EBADF.
        let rc = unsafe { libc::close(-1) };
        assert_eq!(rc, -1);
        assert_eq!(Errno::last().code(), libc::EBADF);
    }

    #[test]
    fn from_i32_round_trips_code() {
        assert_eq!(Errno::from(libc::EPIPE).code(), libc::EPIPE);
    }
}
