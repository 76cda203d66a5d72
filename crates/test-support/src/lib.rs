//! crates/test-support/src/lib.rs
//!
//! Shared helpers for probelog integration tests.
//!
//! [`CapturedStream`] stands in for a log file or for standard output: it is a
//! real anonymous temporary file, so bytes reach it through the same
//! `writev(2)` path production code uses. [`RecordingHooks`] replaces the
//! process abort/exit primitives with a recorder so termination policies can
//! be asserted without killing the test binary.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

use probelog::ProcessHooks;
use probelog_sink::LogStream;

/// Anonymous temporary file used as a capture target.
#[derive(Debug)]
pub struct CapturedStream {
    file: File,
}

impl CapturedStream {
    /// Creates an empty capture file.
    pub fn new() -> Self {
        Self {
            file: tempfile::tempfile().expect("create capture file"),
        }
    }

    /// Borrows the capture file as a log destination.
    pub fn stream(&self) -> LogStream<'_> {
        LogStream::from_handle(&self.file)
    }

    /// Returns every byte written so far.
    pub fn contents(&self) -> Vec<u8> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(0)).expect("rewind capture file");
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).expect("read capture file");
        buffer
    }

    /// Returns the captured bytes as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8(self.contents()).expect("captured output is UTF-8")
    }

    /// Leaks the capture so it can back a `'static` logger.
    pub fn leak(self) -> &'static Self {
        Box::leak(Box::new(self))
    }
}

impl Default for CapturedStream {
    fn default() -> Self {
        Self::new()
    }
}

/// A call made to [`RecordingHooks`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HookCall {
    /// The abort/trap primitive ran.
    Abort,
    /// The exit primitive ran with the given status code.
    Exit(i32),
}

/// Process hooks that record calls instead of terminating.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    calls: Mutex<Vec<HookCall>>,
}

impl RecordingHooks {
    /// Creates a recorder with no calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the calls recorded so far, oldest first.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().expect("hook recorder poisoned").clone()
    }

    fn record(&self, call: HookCall) {
        self.calls.lock().expect("hook recorder poisoned").push(call);
    }
}

impl ProcessHooks for RecordingHooks {
    fn abort(&self) {
        self.record(HookCall::Abort);
    }

    fn exit(&self, code: i32) {
        self.record(HookCall::Exit(code));
    }
}

/// Checks that `line` starts with an info timestamp of the form
/// `YYYY-MM-DD H:M:S ` (date fields padded, time fields not) and returns the
/// remainder of the line.
pub fn strip_info_timestamp(line: &str) -> Option<&str> {
    let (date, rest) = line.split_once(' ')?;
    let (time, rest) = rest.split_once(' ')?;

    let date_ok = {
        let parts: Vec<&str> = date.split('-').collect();
        parts.len() == 3
            && parts[0].len() == 4
            && parts[1].len() == 2
            && parts[2].len() == 2
            && parts.iter().all(|part| all_digits(part))
    };

    let time_ok = {
        let parts: Vec<&str> = time.split(':').collect();
        parts.len() == 3
            && parts
                .iter()
                .all(|part| (1..=2).contains(&part.len()) && all_digits(part))
    };

    (date_ok && time_ok).then_some(rest)
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_digit())
}
