//! End-to-end behaviour of the info and error paths through real descriptors.

use probelog::{Errno, Logger, MSG_SZ, Outcome, TerminationPolicy, Timestamp};
use probelog_sink::Destinations;
use test_support::{CapturedStream, HookCall, RecordingHooks, strip_info_timestamp};

fn logger_for(capture: &CapturedStream) -> Logger<'_, RecordingHooks> {
    Logger::new(Destinations::default().with_stream(capture.stream()))
        .with_hooks(RecordingHooks::new())
}

#[test]
fn info_at_formats_build_message() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    logger.info_at(Timestamp::new(2024, 3, 5, 9, 4, 2), format_args!("build {}", 7));

    assert_eq!(capture.text(), "2024-03-05 9:4:2 build 7\n");
}

#[test]
fn info_uses_live_clock_prefix() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    logger.info(format_args!("probe {} attached", "tcp_connect"));

    let text = capture.text();
    assert_eq!(
        strip_info_timestamp(&text),
        Some("probe tcp_connect attached\n")
    );
}

#[test]
fn error_without_policy_continues() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    let outcome = logger.error(
        TerminationPolicy::EMPTY,
        "connect",
        42,
        format_args!("timeout after {} ms", 500),
    );

    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(capture.text(), "connect:42:timeout after 500 ms\n");
    assert!(logger.hooks().calls().is_empty());
}

#[test]
fn fatal_dispatches_then_exits_with_one() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    let outcome = logger.error(TerminationPolicy::FATAL, "", 0, format_args!("unrecoverable"));

    assert_eq!(outcome, Outcome::Exited);
    assert_eq!(capture.text(), "unrecoverable\n");
    assert_eq!(logger.hooks().calls(), vec![HookCall::Exit(1)]);
}

#[test]
fn abort_and_fatal_only_traps() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    let outcome = logger.error(
        TerminationPolicy::ABORT | TerminationPolicy::FATAL,
        "load_program",
        310,
        format_args!("verifier rejected program"),
    );

    assert_eq!(outcome, Outcome::Trapped);
    assert_eq!(capture.text(), "load_program:310:verifier rejected program\n");
    assert_eq!(logger.hooks().calls(), vec![HookCall::Abort]);
}

#[test]
fn line_without_function_is_not_printed() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    logger.error(TerminationPolicy::EMPTY, "", 77, format_args!("orphan"));

    assert_eq!(capture.text(), "orphan\n");
}

#[test]
fn content_one_short_of_capacity_fills_buffer_exactly() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);
    let body = "a".repeat(MSG_SZ - 1);

    logger.error(TerminationPolicy::EMPTY, "", 0, format_args!("{body}"));

    let bytes = capture.contents();
    assert_eq!(bytes.len(), MSG_SZ);
    assert_eq!(&bytes[..MSG_SZ - 1], body.as_bytes());
    assert_eq!(bytes[MSG_SZ - 1], b'\n');
}

#[test]
fn oversized_message_keeps_first_bytes() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);
    let body: String = ('a'..='z').cycle().take(MSG_SZ * 2).collect();

    logger.error(TerminationPolicy::EMPTY, "", 0, format_args!("{body}"));

    let bytes = capture.contents();
    assert_eq!(bytes.len(), MSG_SZ);
    assert_eq!(&bytes[..MSG_SZ - 1], &body.as_bytes()[..MSG_SZ - 1]);
    assert_eq!(bytes.last(), Some(&b'\n'));
}

#[test]
fn exactly_capacity_with_newline_is_unchanged() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);
    let body = format!("{}\n", "b".repeat(MSG_SZ - 1));

    logger.error(TerminationPolicy::EMPTY, "", 0, format_args!("{body}"));

    assert_eq!(capture.text(), body);
}

#[cfg(feature = "errno")]
#[test]
fn errno_decoration_uses_supplied_errno() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    logger.error_with_errno(
        TerminationPolicy::ERRNO_VALID,
        "open_perf_buffer",
        12,
        Errno::new(libc::EMFILE),
        format_args!("per-cpu buffer"),
    );

    assert_eq!(
        capture.text(),
        "open_perf_buffer:12:: Too many open files (errno 24)per-cpu buffer\n"
    );
}

#[cfg(feature = "errno")]
#[test]
fn error_captures_thread_errno() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    let missing = std::fs::File::open("/nonexistent/probelog/map");
    assert!(missing.is_err());
    logger.error(TerminationPolicy::ERRNO_VALID, "pin", 3, format_args!("map"));

    assert_eq!(
        capture.text(),
        "pin:3:: No such file or directory (errno 2)map\n"
    );
}

#[test]
fn stdout_mirror_receives_identical_bytes() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let logger = Logger::new(
        Destinations::default()
            .with_stream(stream.stream())
            .with_stdout(stdout.stream())
            .with_stdout_mirror(true),
    )
    .with_hooks(RecordingHooks::new());

    logger.error(TerminationPolicy::EMPTY, "sync", 5, format_args!("ring {} lost", 3));

    assert_eq!(stream.text(), "sync:5:ring 3 lost\n");
    assert_eq!(stdout.contents(), stream.contents());
}

#[test]
fn stdout_only_without_stream() {
    let stdout = CapturedStream::new();
    let logger = Logger::new(
        Destinations::default()
            .with_stdout(stdout.stream())
            .with_stdout_mirror(true),
    );

    logger.info_at(Timestamp::new(2025, 1, 9, 0, 0, 5), format_args!("heartbeat"));

    assert_eq!(stdout.text(), "2025-01-09 0:0:5 heartbeat\n");
}

#[test]
fn unmirrored_stdout_stays_untouched() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let logger = Logger::new(
        Destinations::default()
            .with_stream(stream.stream())
            .with_stdout(stdout.stream()),
    );

    logger.info_at(Timestamp::new(2025, 1, 9, 0, 0, 5), format_args!("heartbeat"));

    assert!(stdout.contents().is_empty());
    assert_eq!(stream.text(), "2025-01-09 0:0:5 heartbeat\n");
}

#[test]
fn consecutive_messages_append() {
    let capture = CapturedStream::new();
    let logger = logger_for(&capture);

    logger.info_at(Timestamp::new(2024, 3, 5, 9, 4, 2), format_args!("first"));
    logger.error(TerminationPolicy::EMPTY, "second", 2, format_args!("line\n"));

    assert_eq!(capture.text(), "2024-03-05 9:4:2 first\nsecond:2:line\n");
}
