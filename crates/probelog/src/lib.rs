#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! crates/probelog/src/lib.rs
//!
//! # Overview
//!
//! `probelog` is the logging primitive of a low-level instrumentation agent.
//! It has two entry points:
//!
//! - the **info** path, which prefixes the caller's text with the local time
//!   (`YYYY-MM-DD H:M:S `), and
//! - the **error** path, which prefixes it with `function:line:`, optionally
//!   decorates it with the current `errno`, and then continues, traps, or
//!   exits according to a per-call [`TerminationPolicy`].
//!
//! Messages are written to the destinations described by
//! [`Destinations`] (a log stream and/or standard output), one `writev(2)`
//! per destination.
//!
//! # Design
//!
//! - Every call formats into a [`MessageBuffer`] of [`MSG_SZ`] bytes on its
//!   own stack frame. The logging path never allocates and never calls into
//!   a higher-level logging framework.
//! - [`Logger`] owns an immutable [`Destinations`] value, a [`LocalClock`],
//!   and the [`ProcessHooks`] used for abort and exit. Hosts replace the hooks
//!   with [`Logger::with_hooks`].
//! - [`install`] publishes a logger process-wide for the
//!   [`log_info!`](crate::log_info), [`log_error!`](crate::log_error) and
//!   [`log_error_at!`](crate::log_error_at) macros.
//! - With the `tracing` feature, `ProbeLayer` routes `tracing` events into a
//!   logger.
//!
//! # Invariants
//!
//! - A dispatched message is never longer than [`MSG_SZ`] bytes and always
//!   ends in `\n`. When the text does not fit, the first `MSG_SZ - 1` bytes
//!   are kept and the last byte becomes the newline.
//! - Empty messages are never written.
//! - On the error path the message is dispatched before any hook runs, and
//!   [`TerminationPolicy::ABORT`] takes precedence over
//!   [`TerminationPolicy::FATAL`].
//!
//! # Errors
//!
//! Logging is infallible: truncation is silent and write failures are
//! ignored. Only [`install`] reports a failure ([`AlreadyInstalled`]), and
//! the configuration helpers in `probelog-sink` return their own error type.
//!
//! # Examples
//!
//! ```
//! use probelog::{Logger, Outcome, TerminationPolicy};
//! use probelog_sink::{Destinations, LogStream};
//! use std::io::{Read, Seek, SeekFrom};
//!
//! let mut file = tempfile::tempfile()?;
//! let logger = Logger::new(Destinations::default().with_stream(LogStream::from_handle(&file)));
//!
//! let outcome = logger.error(
//!     TerminationPolicy::EMPTY,
//!     "attach_kprobe",
//!     88,
//!     format_args!("symbol {} not found", "tcp_v4_connect"),
//! );
//! assert_eq!(outcome, Outcome::Continue);
//!
//! file.seek(SeekFrom::Start(0))?;
//! let mut written = String::new();
//! file.read_to_string(&mut written)?;
//! assert_eq!(written, "attach_kprobe:88:symbol tcp_v4_connect not found\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod buffer;
mod errno;
mod format;
pub mod global;
mod hooks;
mod logger;
mod macros;
mod policy;
mod termination;
mod timestamp;
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
mod tracing_bridge;

pub use buffer::{MSG_SZ, MessageBuffer};
pub use errno::Errno;
pub use format::{decorates_errno, format_error, format_info};
pub use global::{AlreadyInstalled, GlobalLogger, install, installed, logger};
pub use hooks::{DefaultHooks, ProcessHooks};
pub use logger::Logger;
pub use policy::TerminationPolicy;
pub use probelog_sink::{ConfigError, Destinations, LogStream, OpenedSink, SinkConfig};
pub use termination::{FATAL_EXIT_CODE, Outcome, handle_termination};
pub use timestamp::{LocalClock, Timestamp};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{ProbeLayer, init_tracing};
