//! crates/probelog/src/format.rs
//! Message formatter for the info and error paths.
//!
//! Both formatters write into a caller-provided [`MessageBuffer`] and finish
//! with [`MessageBuffer::terminate_line`], so the result always fits the
//! buffer and ends in a newline.

use std::fmt;

use crate::buffer::MessageBuffer;
use crate::errno::Errno;
use crate::policy::TerminationPolicy;
use crate::timestamp::Timestamp;

/// Formats an info message: `YYYY-MM-DD H:M:S ` followed by `args`.
///
/// # Examples
///
/// ```
/// use probelog::{MessageBuffer, Timestamp, format_info};
///
/// let mut buffer = MessageBuffer::<64>::new();
/// format_info(&mut buffer, Timestamp::new(2024, 3, 5, 9, 4, 2), format_args!("build {}", 7));
/// assert_eq!(buffer.as_bytes(), b"2024-03-05 9:4:2 build 7\n");
/// ```
pub fn format_info<const N: usize>(
    buffer: &mut MessageBuffer<N>,
    timestamp: Timestamp,
    args: fmt::Arguments<'_>,
) {
    buffer.write_args(format_args!("{timestamp} "));
    buffer.write_args(args);
    buffer.terminate_line();
}

/// Formats an error message.
///
/// Layout, in order:
///
/// - `function:` when `function` is non-empty, followed by `line:` when
///   `line` is positive. The line is never printed without a function name.
/// - `: <strerror text> (errno <N>)` when `policy` has
///   [`ERRNO_VALID`](TerminationPolicy::ERRNO_VALID) and the `errno` feature
///   is enabled.
/// - The caller's text.
///
/// `errno` is ignored unless the decoration is printed.
///
/// # Examples
///
/// ```
/// use probelog::{Errno, MessageBuffer, TerminationPolicy, format_error};
///
/// let mut buffer = MessageBuffer::<64>::new();
/// format_error(
///     &mut buffer,
///     TerminationPolicy::EMPTY,
///     "connect",
///     42,
///     Errno::new(0),
///     format_args!("timeout after {} ms", 500),
/// );
/// assert_eq!(buffer.as_bytes(), b"connect:42:timeout after 500 ms\n");
/// ```
pub fn format_error<const N: usize>(
    buffer: &mut MessageBuffer<N>,
    policy: TerminationPolicy,
    function: &str,
    line: u32,
    errno: Errno,
    args: fmt::Arguments<'_>,
) {
    if !function.is_empty() {
        buffer.push_str(function);
        buffer.push_str(":");
        if line > 0 {
            buffer.write_args(format_args!("{line}:"));
        }
    }

    if decorates_errno(policy) {
        buffer.write_args(format_args!(": {errno} (errno {})", errno.code()));
    }

    buffer.write_args(args);
    buffer.terminate_line();
}

/// Reports whether an error call with `policy` prints the errno decoration.
#[must_use]
pub const fn decorates_errno(policy: TerminationPolicy) -> bool {
    cfg!(feature = "errno") && policy.errno_valid()
}
