//! crates/probelog-sink/src/error.rs
//! Errors raised by the configuration layer.

use std::io;
use std::path::PathBuf;

/// Errors raised while turning a [`SinkConfig`](crate::SinkConfig) into open
/// destinations.
///
/// Only the configuration layer is fallible; dispatching a message never
/// reports an error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A boolean environment variable held a value outside the accepted set.
    #[error("invalid value {value:?} for {variable}: expected 1, 0, true, false, yes, no, on or off")]
    InvalidFlag {
        /// Name of the offending variable.
        variable: &'static str,
        /// Value as found in the environment.
        value: String,
    },

    /// The configured log file could not be opened for appending.
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
