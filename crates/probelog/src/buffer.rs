//! crates/probelog/src/buffer.rs
//! Fixed-capacity, stack-allocated message buffer.

use std::fmt;

/// Capacity of the message buffer used by [`Logger`](crate::Logger), in bytes.
pub const MSG_SZ: usize = 256;

/// Fixed-capacity byte buffer that a single log call formats into.
///
/// Writes past the capacity are dropped silently and the buffer remembers
/// that it truncated. [`terminate_line`](Self::terminate_line) then makes sure
/// the message ends in a newline without growing past `N` bytes: the newline
/// is appended when there is room, otherwise it replaces the final byte.
///
/// The buffer never allocates. A logger creates one per call on its own stack
/// frame, so concurrent calls never share storage.
///
/// # Examples
///
/// ```
/// use probelog::MessageBuffer;
/// use std::fmt::Write;
///
/// let mut buffer = MessageBuffer::<8>::new();
/// write!(buffer, "map {} full", "conn_table").unwrap();
/// buffer.terminate_line();
///
/// assert!(buffer.is_truncated());
/// assert_eq!(buffer.as_bytes(), b"map con\n");
/// ```
#[derive(Clone)]
pub struct MessageBuffer<const N: usize = MSG_SZ> {
    bytes: [u8; N],
    len: usize,
    truncated: bool,
}

impl<const N: usize> MessageBuffer<N> {
    /// Maximum number of bytes the buffer holds, trailing newline included.
    pub const CAPACITY: usize = N;

    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "message buffer capacity must be non-zero") };
        Self {
            bytes: [0; N],
            len: 0,
            truncated: false,
        }
    }

    /// Appends as much of `bytes` as fits.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let available = N - self.len;
        let take = bytes.len().min(available);
        self.bytes[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        if take < bytes.len() {
            self.truncated = true;
        }
    }

    /// Appends as much of `text` as fits.
    ///
    /// Truncation works on bytes, so a multi-byte character may be cut.
    pub fn push_str(&mut self, text: &str) {
        self.push_bytes(text.as_bytes());
    }

    /// Renders `args` into the remaining space.
    ///
    /// A formatting error raised by one of the arguments' trait impls stops
    /// rendering at that point; whatever was written before it is kept.
    pub fn write_args(&mut self, args: fmt::Arguments<'_>) {
        let _ = fmt::write(self, args);
    }

    /// Guarantees the buffer ends with a newline.
    ///
    /// When the last byte is already `\n` nothing changes. Otherwise a newline
    /// is appended if there is room, or the final byte is overwritten when the
    /// buffer is full. An empty buffer becomes a lone `\n`.
    pub fn terminate_line(&mut self) {
        if self.len > 0 && self.bytes[self.len - 1] == b'\n' {
            return;
        }

        if self.len < N {
            self.bytes[self.len] = b'\n';
            self.len += 1;
        } else {
            self.bytes[N - 1] = b'\n';
        }
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the number of bytes written.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bytes that can still be written.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        N - self.len
    }

    /// Reports whether any write was cut short.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Empties the buffer for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }
}

impl<const N: usize> Default for MessageBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for MessageBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl<const N: usize> AsRef<[u8]> for MessageBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for MessageBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("capacity", &N)
            .field("text", &String::from_utf8_lossy(self.as_bytes()))
            .field("truncated", &self.truncated)
            .finish()
    }
}
