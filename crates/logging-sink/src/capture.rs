//! crates/logging-sink/src/capture.rs
//! Shared in-memory writer for inspecting what a sink forwarded.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Cloneable in-memory writer whose clones share one byte buffer.
///
/// Hand one clone to a [`TextSink`](crate::TextSink) (or a logger built on
/// top of it) and keep the other to read back what was forwarded. The buffer
/// lives behind an [`Rc`], so the writer is confined to the thread that
/// created it, matching the single-threaded logger it usually feeds.
///
/// # Examples
///
/// ```
/// use linelog_sink::{SharedBuffer, TextSink};
///
/// let capture = SharedBuffer::new();
/// let mut sink = TextSink::new(capture.clone());
/// sink.forward("hello\n")?;
/// assert_eq!(capture.contents(), "hello\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured bytes decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Returns the number of captured bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.borrow().len()
    }

    /// Reports whether nothing has been captured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    /// Drops everything captured so far.
    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
