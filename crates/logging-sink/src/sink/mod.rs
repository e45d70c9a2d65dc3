use std::fmt;

mod constructors;
mod guard;
mod writing;

pub use guard::StdWriteGuard;

/// Decides whether a [`TextSink`] consults the process-wide stdout toggle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SinkGate {
    /// Forward unconditionally.
    Always,
    /// Forward only while [`std_write_enabled`](crate::std_write_enabled) reports `true`.
    StdWriteToggle,
}

/// Outcome of a [`TextSink::forward`] call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Forwarded {
    /// The text reached the writer; carries the number of bytes written.
    Written(usize),
    /// The sink's gate was closed and the text was dropped.
    Skipped,
}

/// Destination for flushed logger output.
///
/// A sink owns an [`std::io::Write`] implementor and forwards text to it in
/// one `write_all` followed by a writer flush, so each forwarded chunk is
/// visible immediately. Sinks built with [`TextSink::stdout`] honour the
/// process-wide toggle ([`disable_std_write`](crate::disable_std_write));
/// sinks around arbitrary writers forward unconditionally.
///
/// # Examples
///
/// ```
/// use linelog_sink::{Forwarded, TextSink};
///
/// let mut sink = TextSink::new(Vec::new());
/// assert_eq!(sink.forward("line\n")?, Forwarded::Written(5));
/// assert_eq!(sink.into_inner(), b"line\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct TextSink<W> {
    writer: W,
    gate: SinkGate,
    bytes_written: u64,
}

impl<W> fmt::Debug for TextSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSink")
            .field("writer", &self.writer)
            .field("gate", &self.gate)
            .field("bytes_written", &self.bytes_written)
            .finish()
    }
}
