//! crates/logging/src/indent.rs
//! Nesting depth and the indent prefix derived from it.

/// Text repeated once per indent level at the start of each line.
pub const INDENT_UNIT: &str = "|   ";

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Indentation {
    depth: usize,
}

impl Indentation {
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Appends one [`INDENT_UNIT`] per level to `line`.
    pub(crate) fn push_prefix(&self, line: &mut String) {
        line.reserve(INDENT_UNIT.len().saturating_mul(self.depth));
        for _ in 0..self.depth {
            line.push_str(INDENT_UNIT);
        }
    }

    /// Adjusts the depth by `delta`, saturating at zero and at `usize::MAX`.
    /// Returns the change actually applied, which differs from `delta` only
    /// when the adjustment saturated.
    pub(crate) fn add(&mut self, delta: isize) -> isize {
        let before = self.depth;
        self.depth = before.saturating_add_signed(delta);
        if self.depth >= before {
            isize::try_from(self.depth - before).unwrap_or(isize::MAX)
        } else {
            isize::try_from(before - self.depth).map_or(isize::MIN, |fall| -fall)
        }
    }
}
