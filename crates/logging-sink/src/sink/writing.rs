use super::{Forwarded, SinkGate, TextSink};
use crate::switch::std_write_enabled;
use std::io::{self, Write};

impl<W> TextSink<W>
where
    W: Write,
{
    /// Reports whether a [`forward`](Self::forward) call issued now would reach the writer.
    #[must_use]
    pub fn is_open(&self) -> bool {
        match self.gate {
            SinkGate::Always => true,
            SinkGate::StdWriteToggle => std_write_enabled(),
        }
    }

    /// Forwards `text` to the writer and flushes it.
    ///
    /// Empty text is a no-op that still reports [`Forwarded::Written`] with
    /// zero bytes. When the gate is closed nothing is written and
    /// [`Forwarded::Skipped`] is returned.
    pub fn forward(&mut self, text: &str) -> io::Result<Forwarded> {
        if !self.is_open() {
            tracing::trace!(
                target: "linelog::sink",
                bytes = text.len(),
                "standard output disabled, dropping chunk"
            );
            return Ok(Forwarded::Skipped);
        }
        if text.is_empty() {
            return Ok(Forwarded::Written(0));
        }

        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        self.bytes_written += text.len() as u64;
        Ok(Forwarded::Written(text.len()))
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
