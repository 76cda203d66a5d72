#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/probelog-sink/src/lib.rs
//!
//! # Overview
//!
//! `probelog-sink` is the output half of the probe logger. It knows where a
//! finished message goes (an optional log stream and standard output) and how
//! it gets there (one `writev(2)` per destination). It knows nothing about
//! message formatting or termination; those live in the `probelog` crate.
//!
//! # Design
//!
//! - [`LogStream`] borrows a descriptor from its owner. The sink never opens,
//!   rotates, or closes the host's log file.
//! - [`Destinations`] is an immutable `Copy` value built by the host before
//!   logging begins. Loggers read it on every call without synchronisation.
//! - [`SinkConfig`] is the serialisable, environment-loadable description of
//!   the destinations, and [`OpenedSink`] owns a log file opened from it.
//!
//! # Invariants
//!
//! - Empty messages are never written.
//! - Each destination receives exactly one write per dispatched message.
//! - Write failures are swallowed. Dispatch has no error channel.
//!
//! # Errors
//!
//! Only [`SinkConfig::from_env`] and [`SinkConfig::open`] can fail, with
//! [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use probelog_sink::{Destinations, LogStream};
//! use std::io::{Read, Seek, SeekFrom};
//!
//! let mut file = tempfile::tempfile()?;
//! let destinations = Destinations::default().with_stream(LogStream::from_handle(&file));
//! destinations.dispatch(b"tracer started\n");
//!
//! file.seek(SeekFrom::Start(0))?;
//! let mut written = String::new();
//! file.read_to_string(&mut written)?;
//! assert_eq!(written, "tracer started\n");
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod destinations;
mod error;
mod stream;

pub use config::{LOG_FILE_ENV, OpenedSink, STDOUT_ENV, SinkConfig};
pub use destinations::Destinations;
pub use error::ConfigError;
pub use stream::LogStream;
