//! crates/logging/src/guard.rs
//! Scope guards that change logger state and undo the change on close.

use std::fmt;

use crate::contract::contract;
use crate::logger::Logger;

/// Common interface of everything that can be closed early.
pub trait ScopeClose {
    /// Applies the inverse of the scope's change. Closing again is a no-op.
    fn close(&mut self);

    /// Reports whether [`close`](Self::close) still has work to do.
    fn is_open(&self) -> bool;
}

/// The state change a [`ScopeGuard`] applies on open.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Scope {
    /// Indent by the given number of levels.
    Indent(usize),
    /// Turn the active switch off, silencing untagged output.
    Suppress,
    /// Enter the named tag.
    Tag(String),
    /// Add the tag to the enabled set.
    EnableTag(String),
    /// Add the tag to the disabled set.
    DisableTag(String),
    /// Disable autoflush and flush once when the scope ends.
    LargeBlock,
}

impl Scope {
    /// Enters `tag`.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Enables `tag`.
    pub fn enable_tag(tag: impl Into<String>) -> Self {
        Self::EnableTag(tag.into())
    }

    /// Disables `tag`.
    pub fn disable_tag(tag: impl Into<String>) -> Self {
        Self::DisableTag(tag.into())
    }
}

#[derive(Debug)]
enum Undo {
    Indent(isize),
    Suppress,
    Tag(String),
    EnableTag { tag: String, inserted: bool },
    DisableTag { tag: String, inserted: bool },
    LargeBlock { autoflush: bool },
}

/// RAII guard holding one applied [`Scope`].
///
/// Dropping the guard, or calling [`close`](ScopeClose::close), reverts the
/// change exactly once. Guards are expected to close in reverse opening
/// order; for tag scopes an out-of-order close is a contract violation.
///
/// Enable and disable guards remove their tag on close only if they were
/// the guard that inserted it. A guard opened for a tag already in the set
/// leaves the set untouched, so the outer guard still owns the entry.
///
/// ```
/// use linelog::Logger;
///
/// let logger = Logger::for_tests();
/// {
///     let _tag = logger.tag("net");
///     let _off = logger.disable_tag("net");
///     logger.log("dropped\n");
/// }
/// logger.log("kept\n");
/// assert_eq!(logger.total_buffer(), "kept\n");
/// ```
#[must_use = "dropping the guard immediately reverts the scope"]
pub struct ScopeGuard<'a> {
    logger: &'a Logger,
    undo: Option<Undo>,
}

impl<'a> ScopeGuard<'a> {
    /// Applies `scope` to `logger`.
    pub fn open(logger: &'a Logger, scope: Scope) -> Self {
        tracing::trace!(target: "linelog::guard", ?scope, "scope opened");
        let undo = match scope {
            Scope::Indent(levels) => {
                let delta = isize::try_from(levels).unwrap_or(isize::MAX);
                Undo::Indent(logger.shift_indent(delta))
            }
            Scope::Suppress => {
                contract!(
                    logger.active_switch() && logger.tags().is_empty(),
                    "suppress opened while already suppressed or inside tag scope {:?}",
                    logger.tags()
                );
                logger.set_active_switch(false);
                Undo::Suppress
            }
            Scope::Tag(tag) => {
                logger.push_tag(&tag);
                Undo::Tag(tag)
            }
            Scope::EnableTag(tag) => {
                let inserted = logger.insert_enabled(&tag);
                Undo::EnableTag { tag, inserted }
            }
            Scope::DisableTag(tag) => {
                let inserted = logger.insert_disabled(&tag);
                Undo::DisableTag { tag, inserted }
            }
            Scope::LargeBlock => {
                let autoflush = logger.autoflush();
                logger.set_autoflush(false);
                Undo::LargeBlock { autoflush }
            }
        };
        Self {
            logger,
            undo: Some(undo),
        }
    }

    /// Applies `scope` only when `condition` holds; otherwise returns an
    /// inert guard that is already closed.
    pub fn open_if(logger: &'a Logger, condition: bool, scope: Scope) -> Self {
        if condition {
            Self::open(logger, scope)
        } else {
            Self::inert(logger)
        }
    }

    /// A guard that changes nothing.
    pub const fn inert(logger: &'a Logger) -> Self {
        Self { logger, undo: None }
    }

    /// Returns the logger the guard belongs to.
    #[must_use]
    pub const fn logger(&self) -> &'a Logger {
        self.logger
    }
}

impl ScopeClose for ScopeGuard<'_> {
    fn close(&mut self) {
        let Some(undo) = self.undo.take() else {
            return;
        };
        tracing::trace!(target: "linelog::guard", ?undo, "scope closed");
        let logger = self.logger;
        match undo {
            Undo::Indent(applied) => {
                logger.shift_indent(-applied);
            }
            Undo::Suppress => logger.set_active_switch(true),
            Undo::Tag(tag) => logger.pop_tag(&tag),
            Undo::EnableTag { tag, inserted } => {
                if inserted {
                    logger.remove_enabled(&tag);
                }
            }
            Undo::DisableTag { tag, inserted } => {
                if inserted {
                    logger.remove_disabled(&tag);
                }
            }
            Undo::LargeBlock { autoflush } => {
                logger.set_autoflush(autoflush);
                logger.flush();
            }
        }
    }

    fn is_open(&self) -> bool {
        self.undo.is_some()
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for ScopeGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeGuard")
            .field("undo", &self.undo)
            .finish_non_exhaustive()
    }
}

/// An ordered collection of guards closed last-in, first-out.
#[must_use = "dropping the stack immediately reverts every scope in it"]
#[derive(Debug, Default)]
pub struct ScopeStack<'a> {
    guards: Vec<ScopeGuard<'a>>,
}

impl<'a> ScopeStack<'a> {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Takes ownership of `guard`; it closes before every guard pushed earlier.
    pub fn push(&mut self, guard: ScopeGuard<'a>) {
        self.guards.push(guard);
    }

    /// Number of guards held, open or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Reports whether the stack holds no guards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl ScopeClose for ScopeStack<'_> {
    fn close(&mut self) {
        while let Some(mut guard) = self.guards.pop() {
            guard.close();
        }
    }

    fn is_open(&self) -> bool {
        self.guards.iter().any(ScopeClose::is_open)
    }
}

impl Drop for ScopeStack<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<'a> Extend<ScopeGuard<'a>> for ScopeStack<'a> {
    fn extend<I: IntoIterator<Item = ScopeGuard<'a>>>(&mut self, iter: I) {
        self.guards.extend(iter);
    }
}

impl<'a> From<ScopeGuard<'a>> for ScopeStack<'a> {
    fn from(guard: ScopeGuard<'a>) -> Self {
        let mut stack = Self::new();
        stack.push(guard);
        stack
    }
}

impl Logger {
    /// Indents by one level until the guard closes.
    pub fn indent(&self) -> ScopeGuard<'_> {
        self.indent_by(1)
    }

    /// Indents by `levels` until the guard closes.
    pub fn indent_by(&self, levels: usize) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::Indent(levels))
    }

    /// Indents by one level when `condition` holds.
    pub fn indent_if(&self, condition: bool) -> ScopeGuard<'_> {
        ScopeGuard::open_if(self, condition, Scope::Indent(1))
    }

    /// Silences untagged output until the guard closes.
    ///
    /// Tagged output still appears for tags in the enabled set. Opening a
    /// suppress scope inside a tag scope, or inside another suppress scope,
    /// is a contract violation.
    pub fn suppress(&self) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::Suppress)
    }

    /// Suppresses output when `condition` holds.
    pub fn suppress_if(&self, condition: bool) -> ScopeGuard<'_> {
        ScopeGuard::open_if(self, condition, Scope::Suppress)
    }

    /// Enters `tag` until the guard closes.
    pub fn tag(&self, tag: impl Into<String>) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::tag(tag))
    }

    /// Enters `tag` when `condition` holds.
    pub fn tag_if(&self, condition: bool, tag: impl Into<String>) -> ScopeGuard<'_> {
        ScopeGuard::open_if(self, condition, Scope::tag(tag))
    }

    /// Adds `tag` to the enabled set until the guard closes.
    pub fn enable_tag(&self, tag: impl Into<String>) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::enable_tag(tag))
    }

    /// Adds `tag` to the disabled set until the guard closes.
    pub fn disable_tag(&self, tag: impl Into<String>) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::disable_tag(tag))
    }

    /// Buffers completed lines instead of flushing each one, then flushes
    /// once when the guard closes.
    pub fn large_block(&self) -> ScopeGuard<'_> {
        ScopeGuard::open(self, Scope::LargeBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggerConfig;
    use linelog_sink::SharedBuffer;

    #[test]
    fn indent_guard_restores_depth() {
        let logger = Logger::for_tests();
        {
            let _outer = logger.indent();
            let _inner = logger.indent_by(2);
            assert_eq!(logger.indent_level(), 3);
        }
        assert_eq!(logger.indent_level(), 0);
    }

    #[test]
    fn oversized_indent_guard_reverts_exactly() {
        let logger = Logger::for_tests();
        logger.add_indent_level(2);
        {
            let _huge = logger.indent_by(usize::MAX);
            assert_eq!(logger.indent_level(), isize::MAX.unsigned_abs() + 2);
        }
        assert_eq!(logger.indent_level(), 2);
    }

    #[test]
    fn indent_guard_reverts_only_applied_change() {
        let logger = Logger::for_tests();
        logger.add_indent_level(isize::MAX);
        logger.add_indent_level(isize::MAX);
        logger.add_indent_level(1);
        assert_eq!(logger.indent_level(), usize::MAX);
        {
            let _saturated = logger.indent_by(3);
            assert_eq!(logger.indent_level(), usize::MAX);
        }
        assert_eq!(logger.indent_level(), usize::MAX);
    }

    #[test]
    fn inert_guard_changes_nothing() {
        let logger = Logger::for_tests();
        let guard = logger.indent_if(false);
        assert!(!guard.is_open());
        assert_eq!(logger.indent_level(), 0);
        let tag = logger.tag_if(false, "t");
        assert!(!tag.is_open());
        assert!(logger.tags().is_empty());
    }

    #[test]
    fn explicit_close_runs_once() {
        let logger = Logger::for_tests();
        logger.add_indent_level(1);
        let mut guard = logger.indent();
        assert_eq!(logger.indent_level(), 2);
        guard.close();
        guard.close();
        assert_eq!(logger.indent_level(), 1);
        drop(guard);
        assert_eq!(logger.indent_level(), 1);
    }

    #[test]
    fn suppress_toggles_active_switch() {
        let logger = Logger::for_tests();
        {
            let _quiet = logger.suppress();
            assert!(!logger.active_switch());
            assert!(!logger.is_active());
        }
        assert!(logger.active_switch());
        assert!(logger.is_active());
    }

    #[test]
    fn enable_guard_keeps_preexisting_entry() {
        let logger = Logger::for_tests();
        let outer = logger.enable_tag("t");
        {
            let _inner = logger.enable_tag("t");
        }
        assert!(logger.is_tag_enabled("t"));
        drop(outer);
        assert!(!logger.is_tag_enabled("t"));
    }

    #[test]
    fn disable_guard_keeps_preexisting_entry() {
        let logger = Logger::for_tests();
        let outer = logger.disable_tag("t");
        {
            let _inner = logger.disable_tag("t");
        }
        assert!(logger.is_tag_disabled("t"));
        drop(outer);
        assert!(!logger.is_tag_disabled("t"));
    }

    #[test]
    fn large_block_defers_then_flushes() {
        let capture = SharedBuffer::new();
        let config = LoggerConfig::default().timestamps(false);
        let logger = Logger::with_writer(config, capture.clone());
        {
            let _block = logger.large_block();
            assert!(!logger.autoflush());
            logger.log("a\n").log("b\n");
            assert!(capture.is_empty());
        }
        assert!(logger.autoflush());
        assert_eq!(capture.contents(), "a\nb\n");
    }

    #[test]
    fn stack_closes_in_reverse_order() {
        let logger = Logger::for_tests();
        let mut stack = ScopeStack::new();
        stack.push(logger.tag("outer"));
        stack.push(logger.tag("inner"));
        stack.push(logger.indent());
        assert_eq!(stack.len(), 3);
        assert!(stack.is_open());
        assert_eq!(logger.tags(), ["outer", "inner"]);

        stack.close();
        assert!(stack.is_empty());
        assert!(logger.tags().is_empty());
        assert_eq!(logger.indent_level(), 0);
    }

    #[test]
    fn dropping_stack_unwinds_tags() {
        let logger = Logger::for_tests();
        {
            let mut stack = ScopeStack::default();
            stack.extend([logger.tag("a"), logger.tag("b")]);
        }
        assert!(logger.tags().is_empty());
    }

    #[test]
    fn single_guard_converts_into_stack() {
        let logger = Logger::for_tests();
        let stack = ScopeStack::from(logger.tag("t"));
        assert_eq!(stack.len(), 1);
        drop(stack);
        assert!(logger.tags().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "closing tag scope 'a'")]
    fn out_of_order_tag_close_violates_contract() {
        let logger = Logger::for_tests();
        let mut outer = logger.tag("a");
        let inner = logger.tag("b");
        outer.close();
        drop(inner);
    }

    #[test]
    fn debug_shows_pending_undo() {
        let logger = Logger::for_tests();
        let guard = logger.tag("t");
        assert!(format!("{guard:?}").contains("Tag(\"t\")"));
    }
}
