//! Dispatch through real descriptors.

use probelog_sink::Destinations;
use test_support::CapturedStream;

#[test]
fn dispatch_writes_to_stream_only_by_default() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let destinations = Destinations::default()
        .with_stream(stream.stream())
        .with_stdout(stdout.stream());

    destinations.dispatch(b"ring buffer drained\n");

    assert_eq!(stream.text(), "ring buffer drained\n");
    assert!(stdout.contents().is_empty());
}

#[test]
fn mirror_sends_identical_bytes_to_both() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let destinations = Destinations::default()
        .with_stream(stream.stream())
        .with_stdout(stdout.stream())
        .with_stdout_mirror(true);

    destinations.dispatch(b"perf buffer lost 4 samples\n");

    assert_eq!(stream.contents(), b"perf buffer lost 4 samples\n");
    assert_eq!(stdout.contents(), stream.contents());
}

#[test]
fn dispatch_to_stdout_overrides_mirror_flag() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let destinations = Destinations::default()
        .with_stream(stream.stream())
        .with_stdout(stdout.stream());

    destinations.dispatch_to(b"banner\n", true);

    assert_eq!(stdout.text(), "banner\n");
    assert_eq!(stream.text(), "banner\n");
}

#[test]
fn empty_message_touches_neither_destination() {
    let stream = CapturedStream::new();
    let stdout = CapturedStream::new();
    let destinations = Destinations::default()
        .with_stream(stream.stream())
        .with_stdout(stdout.stream())
        .with_stdout_mirror(true);

    destinations.dispatch(b"");
    destinations.dispatch_to(b"", true);

    assert!(stream.contents().is_empty());
    assert!(stdout.contents().is_empty());
}

#[test]
fn raw_write_bypasses_empty_check() {
    let stream = CapturedStream::new();
    let destinations = Destinations::default().with_stream(stream.stream());

    destinations.raw_write(b"no newline", false);
    destinations.raw_write(b"", false);

    assert_eq!(stream.text(), "no newline");
}

#[test]
fn silent_destinations_write_nothing() {
    let stdout = CapturedStream::new();
    let destinations = Destinations::silent().with_stdout(stdout.stream());

    destinations.dispatch(b"dropped\n");

    assert!(stdout.contents().is_empty());
}
