use super::{SinkGate, TextSink};
use std::io::{self, Stdout};
use std::mem;

impl TextSink<Stdout> {
    /// Creates a sink bound to the process's standard output.
    ///
    /// The sink is gated by the process-wide toggle, mirroring how the
    /// logger's default destination can be silenced without touching any
    /// logger state.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_gate(io::stdout(), SinkGate::StdWriteToggle)
    }
}

impl<W> TextSink<W> {
    /// Creates a sink that forwards every chunk to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_gate(writer, SinkGate::Always)
    }

    /// Creates a sink with an explicit [`SinkGate`].
    #[must_use]
    pub fn with_gate(writer: W, gate: SinkGate) -> Self {
        Self {
            writer,
            gate,
            bytes_written: 0,
        }
    }

    /// Returns the gate this sink consults before forwarding.
    #[must_use]
    pub const fn gate(&self) -> SinkGate {
        self.gate
    }

    /// Returns the number of bytes forwarded over the sink's lifetime.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Mutably borrows the underlying writer.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Maps the writer into a different type while keeping the gate and byte count.
    #[must_use]
    pub fn map_writer<F, W2>(self, f: F) -> TextSink<W2>
    where
        F: FnOnce(W) -> W2,
    {
        let TextSink {
            writer,
            gate,
            bytes_written,
        } = self;
        TextSink {
            writer: f(writer),
            gate,
            bytes_written,
        }
    }

    /// Swaps in a new writer and returns the previous one.
    #[must_use = "the returned writer holds output forwarded before the replacement"]
    pub fn replace_writer(&mut self, mut writer: W) -> W {
        mem::swap(&mut self.writer, &mut writer);
        writer
    }
}

impl<W> Default for TextSink<W>
where
    W: Default,
{
    fn default() -> Self {
        Self::new(W::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_sink_obeys_toggle() {
        assert_eq!(TextSink::stdout().gate(), SinkGate::StdWriteToggle);
    }

    #[test]
    fn writer_sink_forwards_unconditionally() {
        let sink = TextSink::new(Vec::<u8>::new());
        assert_eq!(sink.gate(), SinkGate::Always);
        assert_eq!(sink.bytes_written(), 0);
    }

    #[test]
    fn replace_writer_returns_previous() {
        let mut sink = TextSink::new(vec![1u8]);
        let previous = sink.replace_writer(vec![2u8]);
        assert_eq!(previous, vec![1u8]);
        assert_eq!(sink.get_ref(), &vec![2u8]);
    }

    #[test]
    fn map_writer_preserves_gate() {
        let sink = TextSink::with_gate(Vec::<u8>::new(), SinkGate::StdWriteToggle);
        let mapped = sink.map_writer(std::io::Cursor::new);
        assert_eq!(mapped.gate(), SinkGate::StdWriteToggle);
    }
}
