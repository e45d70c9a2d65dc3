//! crates/logging/src/line_buffer.rs
//! Line accumulation and the total buffer awaiting a flush.

/// Piece of written text: either content without newlines or a line break.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Newline,
}

/// Splits `text` into content runs and newline markers, preserving order.
/// Empty runs are dropped, so `"\n\n"` yields two markers and nothing else.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    text.split_inclusive('\n').flat_map(|piece| {
        let (body, newline) = match piece.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (piece, false),
        };
        [
            (!body.is_empty()).then_some(Segment::Text(body)),
            newline.then_some(Segment::Newline),
        ]
        .into_iter()
        .flatten()
    })
}

/// The in-progress line plus everything completed since the last flush.
///
/// `forwarded` marks how much of `total` already reached the sink. Loggers
/// that retain output keep `total` intact across flushes and only advance
/// the mark; the others clear `total` once it has been handed over.
#[derive(Clone, Debug)]
pub(crate) struct LineBuffer {
    line: String,
    total: String,
    at_line_start: bool,
    forwarded: usize,
    retain: bool,
}

impl LineBuffer {
    pub(crate) fn new(retain: bool) -> Self {
        Self {
            line: String::new(),
            total: String::new(),
            at_line_start: true,
            forwarded: 0,
            retain,
        }
    }

    pub(crate) fn line(&self) -> &str {
        &self.line
    }

    pub(crate) fn total(&self) -> &str {
        &self.total
    }

    pub(crate) fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Appends a content run. `prefix` writes the line prefix and only runs
    /// for the first content of a physical line.
    pub(crate) fn append(&mut self, text: &str, prefix: impl FnOnce(&mut String)) {
        if self.at_line_start {
            prefix(&mut self.line);
        }
        self.line.push_str(text);
        self.at_line_start = false;
    }

    /// Removes and returns the in-progress line.
    pub(crate) fn take_line(&mut self) -> String {
        std::mem::take(&mut self.line)
    }

    /// Moves a taken line into the total buffer. A terminated line gets its
    /// newline and starts a new physical line; an unterminated one does not.
    pub(crate) fn commit(&mut self, line: &str, terminated: bool) {
        self.total.push_str(line);
        if terminated {
            self.total.push('\n');
        }
        self.at_line_start = terminated;
    }

    /// Returns the text not yet handed to the sink and marks it as handed
    /// over. Retaining buffers keep the text in `total`; others drop it.
    pub(crate) fn take_pending(&mut self) -> String {
        if self.retain {
            let pending = self.total[self.forwarded..].to_owned();
            self.forwarded = self.total.len();
            pending
        } else {
            self.forwarded = 0;
            std::mem::take(&mut self.total)
        }
    }
}
