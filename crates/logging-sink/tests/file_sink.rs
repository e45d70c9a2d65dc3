//! Integration tests for sinks backed by real files.

use linelog_sink::{Forwarded, SinkGate, TextSink};
use std::fs::{self, File};
use std::io::BufWriter;

#[test]
fn file_sink_persists_forwarded_chunks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.log");
    let file = File::create(&path).expect("create log file");

    let mut sink = TextSink::new(file);
    sink.forward("alpha\n").expect("forward succeeds");
    sink.forward("beta").expect("forward succeeds");
    drop(sink);

    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, "alpha\nbeta");
}

#[test]
fn buffered_file_sink_is_flushed_per_chunk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("buffered.log");
    let file = File::create(&path).expect("create log file");

    let mut sink = TextSink::new(BufWriter::new(file));
    assert_eq!(
        sink.forward("line\n").expect("forward succeeds"),
        Forwarded::Written(5)
    );

    // The sink flushes after every chunk, so the file is current while the
    // BufWriter is still alive.
    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, "line\n");
    assert_eq!(sink.bytes_written(), 5);
}

#[test]
fn always_gate_ignores_stdout_toggle_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gated.log");
    let file = File::create(&path).expect("create log file");

    let sink = TextSink::with_gate(file, SinkGate::Always);
    assert!(sink.is_open());
}
