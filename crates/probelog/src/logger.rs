//! crates/probelog/src/logger.rs
//! The info and error entry points.

use std::fmt;

use probelog_sink::Destinations;

use crate::buffer::{MSG_SZ, MessageBuffer};
use crate::errno::Errno;
use crate::format::{decorates_errno, format_error, format_info};
use crate::hooks::{DefaultHooks, ProcessHooks};
use crate::policy::TerminationPolicy;
use crate::termination::{Outcome, handle_termination};
use crate::timestamp::{LocalClock, Timestamp};

/// Formats, dispatches and, on the error path, applies termination policies.
///
/// A logger is an immutable bundle of [`Destinations`], [`ProcessHooks`] and
/// a [`LocalClock`]. Every call formats into a fresh [`MSG_SZ`]-byte buffer
/// on its own stack frame, so a logger can be shared between threads without
/// locking. Interleaving of concurrent messages is left to the kernel.
///
/// # Examples
///
/// ```
/// use probelog::{Logger, TerminationPolicy, Timestamp};
/// use probelog_sink::{Destinations, LogStream};
/// use std::io::{Read, Seek, SeekFrom};
///
/// let mut file = tempfile::tempfile()?;
/// let logger = Logger::new(Destinations::default().with_stream(LogStream::from_handle(&file)));
///
/// logger.info_at(Timestamp::new(2024, 3, 5, 9, 4, 2), format_args!("build {}", 7));
/// logger.error(TerminationPolicy::EMPTY, "connect", 42, format_args!("timeout after {} ms", 500));
///
/// file.seek(SeekFrom::Start(0))?;
/// let mut written = String::new();
/// file.read_to_string(&mut written)?;
/// assert_eq!(written, "2024-03-05 9:4:2 build 7\nconnect:42:timeout after 500 ms\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Logger<'fd, H = DefaultHooks> {
    destinations: Destinations<'fd>,
    hooks: H,
    clock: LocalClock,
}

impl<'fd> Logger<'fd, DefaultHooks> {
    /// Creates a logger with the default process hooks.
    ///
    /// The local UTC offset is resolved here and stays fixed for the life of
    /// the logger.
    #[must_use]
    pub fn new(destinations: Destinations<'fd>) -> Self {
        Self {
            destinations,
            hooks: DefaultHooks,
            clock: LocalClock::detect(),
        }
    }
}

impl Logger<'static, DefaultHooks> {
    /// A logger that writes nothing but still honours termination policies.
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            destinations: Destinations::silent(),
            hooks: DefaultHooks,
            clock: LocalClock::utc(),
        }
    }
}

impl<'fd, H: ProcessHooks> Logger<'fd, H> {
    /// Replaces the process hooks.
    #[must_use]
    pub fn with_hooks<T: ProcessHooks>(self, hooks: T) -> Logger<'fd, T> {
        self.map_hooks(|_| hooks)
    }

    /// Transforms the process hooks, keeping destinations and clock.
    #[must_use]
    pub fn map_hooks<T, F>(self, map: F) -> Logger<'fd, T>
    where
        T: ProcessHooks,
        F: FnOnce(H) -> T,
    {
        Logger {
            destinations: self.destinations,
            hooks: map(self.hooks),
            clock: self.clock,
        }
    }

    /// Replaces the clock used for info timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: LocalClock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the destinations messages are written to.
    #[must_use]
    pub const fn destinations(&self) -> &Destinations<'fd> {
        &self.destinations
    }

    /// Returns the process hooks.
    #[must_use]
    pub const fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns the clock used for info timestamps.
    #[must_use]
    pub const fn clock(&self) -> LocalClock {
        self.clock
    }

    /// Writes a timestamped informational message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.info_at(self.clock.now(), args);
    }

    /// Writes an informational message stamped with `timestamp`.
    pub fn info_at(&self, timestamp: Timestamp, args: fmt::Arguments<'_>) {
        let mut buffer = MessageBuffer::<MSG_SZ>::new();
        format_info(&mut buffer, timestamp, args);
        self.destinations.dispatch(buffer.as_bytes());
    }

    /// Writes an error message and applies `policy`.
    ///
    /// When `policy` asks for errno decoration the thread's `errno` is read
    /// before anything else runs. With the default hooks this function does
    /// not return for [`ABORT`](TerminationPolicy::ABORT) or
    /// [`FATAL`](TerminationPolicy::FATAL).
    pub fn error(
        &self,
        policy: TerminationPolicy,
        function: &str,
        line: u32,
        args: fmt::Arguments<'_>,
    ) -> Outcome {
        let errno = if decorates_errno(policy) {
            Errno::last()
        } else {
            Errno::new(0)
        };
        self.error_with_errno(policy, function, line, errno, args)
    }

    /// Like [`error`](Self::error), with an `errno` captured by the caller.
    pub fn error_with_errno(
        &self,
        policy: TerminationPolicy,
        function: &str,
        line: u32,
        errno: Errno,
        args: fmt::Arguments<'_>,
    ) -> Outcome {
        let mut buffer = MessageBuffer::<MSG_SZ>::new();
        format_error(&mut buffer, policy, function, line, errno, args);
        self.destinations.dispatch(buffer.as_bytes());
        handle_termination(policy, &self.hooks)
    }

    /// Writes `bytes` unformatted. See [`Destinations::raw_write`].
    pub fn raw_write(&self, bytes: &[u8], also_stdout: bool) {
        self.destinations.raw_write(bytes, also_stdout);
    }
}

impl<H> fmt::Debug for Logger<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("destinations", &self.destinations)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
