//! crates/probelog-sink/src/destinations.rs
//! Destination configuration and the dispatch path.

use crate::stream::LogStream;

/// Where formatted messages go: an optional log stream, plus standard output
/// when mirroring is enabled or a call asks for it explicitly.
///
/// The value is built once by the host before logging starts and is never
/// mutated afterwards. It is `Copy`, so every logger call reads a consistent
/// snapshot without locking.
///
/// # Examples
///
/// Mirror every message to both a log file and standard output:
///
/// ```
/// use probelog_sink::{Destinations, LogStream};
///
/// let file = tempfile::tempfile()?;
/// let destinations = Destinations::default()
///     .with_stream(LogStream::from_handle(&file))
///     .with_stdout_mirror(true);
///
/// assert!(destinations.stream().is_some());
/// assert!(destinations.mirrors_to_stdout());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Destinations<'fd> {
    stream: Option<LogStream<'fd>>,
    stdout: LogStream<'fd>,
    mirror_to_stdout: bool,
}

impl Destinations<'static> {
    /// Destinations with no log stream and stdout mirroring disabled.
    ///
    /// Messages dispatched through this configuration are discarded.
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            stream: None,
            stdout: LogStream::stdout(),
            mirror_to_stdout: false,
        }
    }

    /// Destinations that write to standard output only.
    #[must_use]
    pub const fn stdout_only() -> Self {
        Self {
            stream: None,
            stdout: LogStream::stdout(),
            mirror_to_stdout: true,
        }
    }
}

impl Default for Destinations<'static> {
    fn default() -> Self {
        Self::silent()
    }
}

impl<'fd> Destinations<'fd> {
    /// Builds destinations from an optional log stream and the stdout flag.
    #[must_use]
    pub const fn new(stream: Option<LogStream<'fd>>, mirror_to_stdout: bool) -> Self {
        Self {
            stream,
            stdout: LogStream::stdout(),
            mirror_to_stdout,
        }
    }

    /// Sets the log stream.
    #[must_use]
    pub const fn with_stream(mut self, stream: LogStream<'fd>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Enables or disables mirroring of every message to standard output.
    #[must_use]
    pub const fn with_stdout_mirror(mut self, mirror_to_stdout: bool) -> Self {
        self.mirror_to_stdout = mirror_to_stdout;
        self
    }

    /// Replaces the descriptor used as "standard output".
    ///
    /// Hosts that have redirected their console (and tests that need to
    /// observe the stdout leg) point it somewhere other than descriptor 1.
    #[must_use]
    pub const fn with_stdout(mut self, stdout: LogStream<'fd>) -> Self {
        self.stdout = stdout;
        self
    }

    /// Returns the configured log stream, if any.
    #[must_use]
    pub const fn stream(&self) -> Option<LogStream<'fd>> {
        self.stream
    }

    /// Returns the handle used for the stdout leg.
    #[must_use]
    pub const fn stdout(&self) -> LogStream<'fd> {
        self.stdout
    }

    /// Reports whether every message is mirrored to standard output.
    #[must_use]
    pub const fn mirrors_to_stdout(&self) -> bool {
        self.mirror_to_stdout
    }

    /// Raw write primitive.
    ///
    /// Writes `bytes` to standard output when `also_stdout` is set, then to
    /// the log stream when one is configured. Each destination receives one
    /// vectored write; failures are ignored and nothing is retried.
    pub fn raw_write(&self, bytes: &[u8], also_stdout: bool) {
        if also_stdout {
            self.stdout.write_best_effort(bytes);
        }

        if let Some(stream) = self.stream {
            stream.write_best_effort(bytes);
        }
    }

    /// Delivers a finished message to the configured destinations.
    ///
    /// Empty messages are dropped without touching either descriptor.
    pub fn dispatch(&self, message: &[u8]) {
        self.dispatch_to(message, false);
    }

    /// Like [`dispatch`](Self::dispatch), but also writes to standard output
    /// when `to_stdout` is set, regardless of the mirror flag.
    pub fn dispatch_to(&self, message: &[u8], to_stdout: bool) {
        if message.is_empty() {
            return;
        }

        self.raw_write(message, self.mirror_to_stdout || to_stdout);
    }
}
