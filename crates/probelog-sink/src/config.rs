//! crates/probelog-sink/src/config.rs
//! Host-side description of the destinations, loadable from the environment.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::destinations::Destinations;
use crate::error::ConfigError;
use crate::stream::LogStream;

/// Environment variable naming the log file to append to.
pub const LOG_FILE_ENV: &str = "PROBELOG_FILE";

/// Environment variable enabling the stdout mirror.
pub const STDOUT_ENV: &str = "PROBELOG_STDOUT";

/// Description of where log output should go.
///
/// This is the serialisable counterpart of [`Destinations`]: it names a path
/// rather than holding a descriptor. [`open`](Self::open) performs the one
/// piece of file lifecycle the host delegates here, opening the file in
/// append mode, and hands back an [`OpenedSink`] that owns it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SinkConfig {
    /// Log file to append to.
    pub log_file: Option<PathBuf>,
    /// Mirror every message to standard output.
    pub mirror_to_stdout: bool,
}

impl SinkConfig {
    /// Creates a configuration with no log file and mirroring disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Enables or disables the stdout mirror.
    #[must_use]
    pub fn with_stdout_mirror(mut self, mirror_to_stdout: bool) -> Self {
        self.mirror_to_stdout = mirror_to_stdout;
        self
    }

    /// Reads [`LOG_FILE_ENV`] and [`STDOUT_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        let log_file = lookup(LOG_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let mirror_to_stdout = match lookup(STDOUT_ENV) {
            Some(value) if !value.is_empty() => parse_flag(STDOUT_ENV, &value)?,
            _ => false,
        };

        Ok(Self {
            log_file,
            mirror_to_stdout,
        })
    }

    /// Opens the configured log file for appending, creating it if needed.
    pub fn open(&self) -> Result<OpenedSink, ConfigError> {
        let file = self.log_file.as_deref().map(open_append).transpose()?;

        Ok(OpenedSink {
            file,
            mirror_to_stdout: self.mirror_to_stdout,
        })
    }
}

fn open_append(path: &Path) -> Result<File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConfigError::Open {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_flag(variable: &'static str, value: &OsString) -> Result<bool, ConfigError> {
    let invalid = || ConfigError::InvalidFlag {
        variable,
        value: value.to_string_lossy().into_owned(),
    };

    let text = value.to_str().ok_or_else(invalid)?;
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid()),
    }
}

/// Destinations whose log file is owned by this value.
///
/// Keep it alive for as long as any logger built from
/// [`destinations`](Self::destinations) is in use; dropping it closes the
/// file.
#[derive(Debug)]
pub struct OpenedSink {
    file: Option<File>,
    mirror_to_stdout: bool,
}

impl OpenedSink {
    /// Borrows the opened file as [`Destinations`].
    #[must_use]
    pub fn destinations(&self) -> Destinations<'_> {
        Destinations::new(
            self.file.as_ref().map(LogStream::from_handle),
            self.mirror_to_stdout,
        )
    }

    /// Returns the opened log file, if one was configured.
    #[must_use]
    pub fn file(&self) -> Option<&File> {
        self.file.as_ref()
    }

    /// Consumes the sink and returns the log file.
    #[must_use]
    pub fn into_file(self) -> Option<File> {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), OsString::from(value)))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = SinkConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SinkConfig::default());
    }

    #[test]
    fn reads_log_file_and_stdout_flag() {
        let config = SinkConfig::from_lookup(lookup_from(&[
            (LOG_FILE_ENV, "/var/log/agent.log"),
            (STDOUT_ENV, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.log_file, Some(PathBuf::from("/var/log/agent.log")));
        assert!(config.mirror_to_stdout);
    }

    #[test]
    fn flag_parsing_accepts_common_spellings() {
        for (value, expected) in [
            ("1", true),
            ("TRUE", true),
            (" on ", true),
            ("0", false),
            ("No", false),
            ("off", false),
        ] {
            let config = SinkConfig::from_lookup(lookup_from(&[(STDOUT_ENV, value)])).unwrap();
            assert_eq!(config.mirror_to_stdout, expected, "value {value:?}");
        }
    }

    #[test]
    fn empty_values_are_treated_as_unset() {
        let config =
            SinkConfig::from_lookup(lookup_from(&[(LOG_FILE_ENV, ""), (STDOUT_ENV, "")])).unwrap();
        assert_eq!(config, SinkConfig::default());
    }

    #[test]
    fn rejects_unknown_flag_value() {
        let error = SinkConfig::from_lookup(lookup_from(&[(STDOUT_ENV, "sometimes")])).unwrap_err();
        match error {
            ConfigError::InvalidFlag { variable, value } => {
                assert_eq!(variable, STDOUT_ENV);
                assert_eq!(value, "sometimes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn open_without_log_file_has_no_stream() {
        let sink = SinkConfig::new().with_stdout_mirror(true).open().unwrap();
        assert!(sink.file().is_none());
        let destinations = sink.destinations();
        assert!(destinations.stream().is_none());
        assert!(destinations.mirrors_to_stdout());
    }

    #[test]
    fn open_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.log");
        std::fs::write(&path, b"earlier\n").unwrap();

        let sink = SinkConfig::new().with_log_file(&path).open().unwrap();
        sink.destinations().dispatch(b"later\n");
        drop(sink);

        assert_eq!(std::fs::read(&path).unwrap(), b"earlier\nlater\n");
    }

    #[test]
    fn open_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("agent.log");

        let error = SinkConfig::new().with_log_file(&path).open().unwrap_err();
        assert!(matches!(error, ConfigError::Open { path: ref p, .. } if *p == path));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let config: SinkConfig = serde_json::from_str(r#"{"mirror_to_stdout":true}"#).unwrap();
        assert!(config.mirror_to_stdout);
        assert!(config.log_file.is_none());
    }
}
