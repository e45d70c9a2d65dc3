//! crates/logging/src/logger.rs
//! The buffering logger: write path, flush path and inspection API.

use std::cell::{RefCell, RefMut};
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};

use linelog_sink::TextSink;

use crate::activation::Activation;
use crate::config::LoggerConfig;
use crate::contract::contract;
use crate::indent::Indentation;
use crate::line_buffer::{LineBuffer, Segment, segments};
use crate::timestamp::push_clock_prefix;
use crate::value::{Fragment, LogValue};

type LineObserver = Box<dyn FnMut(&str)>;

/// Mutable state behind a [`Logger`].
struct State {
    config: LoggerConfig,
    activation: Activation,
    indentation: Indentation,
    lines: LineBuffer,
    autoflush: bool,
    locked: bool,
    sink_error: Option<io::Error>,
}

impl State {
    fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            activation: Activation::default(),
            indentation: Indentation::default(),
            lines: LineBuffer::new(config.retain_output),
            autoflush: config.autoflush,
            locked: false,
            sink_error: None,
        }
    }

    fn append_run(&mut self, run: &str) {
        let timestamps = self.config.timestamps;
        let indentation = self.indentation;
        self.lines.append(run, |line| {
            if timestamps {
                push_clock_prefix(line);
            }
            indentation.push_prefix(line);
        });
    }
}

/// Buffered, line-oriented text logger gated by tag scopes.
///
/// Text written through [`log`](Self::log), [`write_str`](Self::write_str)
/// or `write!` is split on newlines. Each physical line gets an optional
/// `[HH:MM:SS] ` prefix followed by the indent prefix, and completed lines
/// move into the total buffer, which is forwarded to the output sink on
/// [`flush`](Self::flush) (automatically after every line while autoflush is
/// on).
///
/// Whether a write has any effect is decided by two gates: the manual switch
/// ([`manual_deactivate`](Self::manual_deactivate)) and the tag resolver,
/// which looks only at the innermost entered tag together with the enabled
/// and disabled tag sets. Tag state changes only through scope guards such
/// as [`tag`](Self::tag) and [`disable_tag`](Self::disable_tag).
///
/// All methods take `&self`; the state lives in [`RefCell`]s, so a logger is
/// confined to one thread and guards can borrow it while writes continue.
///
/// # Examples
///
/// ```
/// use linelog::Logger;
///
/// let logger = Logger::for_tests();
/// logger.log("Line1\n");
/// {
///     let _indent = logger.indent();
///     logger.log("Line2\n");
/// }
/// logger.log("Line3\n");
/// assert_eq!(logger.total_buffer(), "Line1\n|   Line2\nLine3\n");
/// ```
pub struct Logger {
    state: RefCell<State>,
    observer: RefCell<Option<LineObserver>>,
    sink: RefCell<TextSink<Box<dyn Write>>>,
}

impl Logger {
    /// Creates a logger with timestamps that forwards to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    /// Creates a diagnostic logger: no timestamps, retained total buffer and
    /// a sink that discards forwarded text.
    ///
    /// Use [`total_buffer`](Self::total_buffer) to inspect what was logged.
    #[must_use]
    pub fn for_tests() -> Self {
        Self::with_writer(LoggerConfig::test(), io::sink())
    }

    /// Creates a logger with `config` that forwards to standard output.
    #[must_use]
    pub fn with_config(config: LoggerConfig) -> Self {
        Self::with_sink(config, TextSink::stdout().map_writer(boxed_writer))
    }

    /// Creates a logger with `config` that forwards to `writer`.
    #[must_use]
    pub fn with_writer<W>(config: LoggerConfig, writer: W) -> Self
    where
        W: Write + 'static,
    {
        Self::with_sink(config, TextSink::new(boxed_writer(writer)))
    }

    /// Creates a logger around an existing sink.
    #[must_use]
    pub fn with_sink(config: LoggerConfig, sink: TextSink<Box<dyn Write>>) -> Self {
        Self {
            state: RefCell::new(State::new(config)),
            observer: RefCell::new(None),
            sink: RefCell::new(sink),
        }
    }

    /// Returns the configuration the logger was built with.
    #[must_use]
    pub fn config(&self) -> LoggerConfig {
        self.state.borrow().config
    }

    // ------------------------------------------------------------------
    // Write API
    // ------------------------------------------------------------------

    /// Writes a value and returns the logger for chaining.
    ///
    /// Text is buffered line by line; the [`Flush`](crate::Flush) marker
    /// moves the partial line into the total buffer. Nothing happens while
    /// output is inactive.
    pub fn log<V>(&self, value: V) -> &Self
    where
        V: LogValue,
    {
        if !self.begin_write() {
            return self;
        }
        match value.to_fragment() {
            Fragment::Text(text) => self.write_text(&text),
            Fragment::Flush => self.complete_line(false),
        }
        self
    }

    /// Writes a string slice.
    pub fn write_str(&self, text: &str) -> &Self {
        self.log(text)
    }

    /// Moves the partial line into the total buffer without a newline.
    pub fn flush_line(&self) -> &Self {
        self.log(crate::Flush)
    }

    /// Writes formatted text, making `write!` and `writeln!` usable on `&Logger`.
    ///
    /// Formatting is skipped entirely while output is inactive.
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        if !self.begin_write() {
            return;
        }
        match args.as_str() {
            Some(text) => self.write_text(text),
            None => self.write_text(&args.to_string()),
        }
    }

    /// Forwards the pending part of the total buffer to the sink.
    ///
    /// Loggers that do not retain output clear the total buffer afterwards.
    /// Flushing with nothing pending is a no-op.
    pub fn flush(&self) {
        self.assert_unlocked("flush");
        self.forward_pending();
    }

    fn begin_write(&self) -> bool {
        let state = self.state.borrow();
        contract!(!state.locked, "write to a locked logger");
        state.activation.allows_output()
    }

    fn write_text(&self, text: &str) {
        for segment in segments(text) {
            match segment {
                Segment::Text(run) => self.state.borrow_mut().append_run(run),
                Segment::Newline => self.complete_line(true),
            }
        }
    }

    fn complete_line(&self, terminated: bool) {
        // The line is committed before the observer runs; observer writes
        // follow it and start a fresh line.
        let (line, autoflush) = {
            let mut state = self.state.borrow_mut();
            let line = state.lines.take_line();
            state.lines.commit(&line, terminated);
            (line, state.autoflush)
        };
        self.notify_observer(&line);
        if autoflush {
            self.forward_pending();
        }
    }

    fn notify_observer(&self, line: &str) {
        // A write issued from inside the observer finds the slot borrowed and
        // completes its lines without a nested notification.
        if let Ok(mut slot) = self.observer.try_borrow_mut()
            && let Some(observer) = slot.as_mut()
        {
            observer(line);
        }
    }

    fn forward_pending(&self) {
        let pending = self.state.borrow_mut().lines.take_pending();
        if pending.is_empty() {
            return;
        }

        let Ok(mut sink) = self.sink.try_borrow_mut() else {
            tracing::debug!(
                target: "linelog::logger",
                bytes = pending.len(),
                "sink busy with a re-entrant flush, dropping chunk"
            );
            return;
        };
        let result = sink.forward(&pending);
        drop(sink);

        if let Err(error) = result {
            tracing::warn!(target: "linelog::logger", %error, "failed to forward log output");
            self.state.borrow_mut().sink_error = Some(error);
        }
    }

    // ------------------------------------------------------------------
    // Observer and sink
    // ------------------------------------------------------------------

    /// Installs a callback receiving every completed line.
    ///
    /// The callback sees the line as buffered, including timestamp and
    /// indent prefixes but without the trailing newline. It also runs for
    /// the partial line moved by a [`Flush`](crate::Flush) marker.
    pub fn set_line_observer<F>(&self, observer: F)
    where
        F: FnMut(&str) + 'static,
    {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Removes the line observer.
    pub fn clear_line_observer(&self) {
        *self.observer.borrow_mut() = None;
    }

    /// Returns and clears the most recent sink write failure.
    pub fn take_sink_error(&self) -> Option<io::Error> {
        self.state.borrow_mut().sink_error.take()
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Adjusts the indent depth by `delta`, clamping at zero and saturating at
    /// `usize::MAX`.
    pub fn add_indent_level(&self, delta: isize) {
        self.shift_indent(delta);
    }

    /// Returns the current indent depth.
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.state.borrow().indentation.depth()
    }

    /// Reports whether every completed line is flushed immediately.
    #[must_use]
    pub fn autoflush(&self) -> bool {
        self.state.borrow().autoflush
    }

    /// Enables or disables flushing after every completed line.
    pub fn set_autoflush(&self, on: bool) {
        self.mutate("set_autoflush").autoflush = on;
    }

    /// Re-enables output after [`manual_deactivate`](Self::manual_deactivate).
    pub fn manual_activate(&self) {
        self.mutate("manual_activate").activation.set_manual_switch(true);
    }

    /// Turns every write into a no-op without touching tag state.
    pub fn manual_deactivate(&self) {
        self.mutate("manual_deactivate")
            .activation
            .set_manual_switch(false);
    }

    /// Reports the manual switch.
    #[must_use]
    pub fn is_manually_active(&self) -> bool {
        self.state.borrow().activation.manual_switch()
    }

    /// Forbids every mutating call until [`unlock`](Self::unlock).
    pub fn lock(&self) {
        self.mutate("lock").locked = true;
    }

    /// Lifts a [`lock`](Self::lock).
    pub fn unlock(&self) {
        self.state.borrow_mut().locked = false;
    }

    /// Reports whether the logger is locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.borrow().locked
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// Resolved tag activation, ignoring the manual switch.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.borrow().activation.is_active()
    }

    /// Whether a write issued now would be buffered.
    #[must_use]
    pub fn allows_output(&self) -> bool {
        self.state.borrow().activation.allows_output()
    }

    /// Default activation used while no tag is entered.
    #[must_use]
    pub fn active_switch(&self) -> bool {
        self.state.borrow().activation.active_switch()
    }

    /// Returns the unterminated line currently being assembled.
    #[must_use]
    pub fn line_buffer(&self) -> String {
        self.state.borrow().lines.line().to_owned()
    }

    /// Returns the completed text not yet cleared by a flush.
    #[must_use]
    pub fn total_buffer(&self) -> String {
        self.state.borrow().lines.total().to_owned()
    }

    /// Returns the entered tags, outermost first.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.state.borrow().activation.tags().to_vec()
    }

    /// Returns the innermost entered tag.
    #[must_use]
    pub fn innermost_tag(&self) -> Option<String> {
        self.state
            .borrow()
            .activation
            .innermost_tag()
            .map(str::to_owned)
    }

    /// Returns the globally enabled tags.
    #[must_use]
    pub fn enabled_tags(&self) -> BTreeSet<String> {
        self.state.borrow().activation.enabled().clone()
    }

    /// Returns the globally disabled tags.
    #[must_use]
    pub fn disabled_tags(&self) -> BTreeSet<String> {
        self.state.borrow().activation.disabled().clone()
    }

    /// Reports whether `tag` is in the enabled set.
    #[must_use]
    pub fn is_tag_enabled(&self, tag: &str) -> bool {
        self.state.borrow().activation.enabled().contains(tag)
    }

    /// Reports whether `tag` is in the disabled set.
    #[must_use]
    pub fn is_tag_disabled(&self, tag: &str) -> bool {
        self.state.borrow().activation.disabled().contains(tag)
    }

    // ------------------------------------------------------------------
    // Mutation API for scope guards
    // ------------------------------------------------------------------

    /// Adjusts the indent depth and returns the change actually applied.
    pub(crate) fn shift_indent(&self, delta: isize) -> isize {
        let applied = self.mutate("add_indent_level").indentation.add(delta);
        if applied != delta {
            tracing::debug!(target: "linelog::logger", delta, applied, "indent level saturated");
        }
        applied
    }

    pub(crate) fn push_tag(&self, tag: &str) {
        self.mutate("push_tag").activation.push_tag(tag.to_owned());
    }

    pub(crate) fn pop_tag(&self, expected: &str) {
        let mut state = self.mutate("pop_tag");
        contract!(!state.activation.tags().is_empty(), "tag stack empty");
        contract!(
            state.activation.innermost_tag() == Some(expected),
            "closing tag scope '{expected}' but the innermost tag is {:?}",
            state.activation.innermost_tag()
        );
        state.activation.pop_tag();
    }

    pub(crate) fn insert_enabled(&self, tag: &str) -> bool {
        self.mutate("insert_enabled").activation.insert_enabled(tag)
    }

    pub(crate) fn remove_enabled(&self, tag: &str) -> bool {
        self.mutate("remove_enabled").activation.remove_enabled(tag)
    }

    pub(crate) fn insert_disabled(&self, tag: &str) -> bool {
        self.mutate("insert_disabled").activation.insert_disabled(tag)
    }

    pub(crate) fn remove_disabled(&self, tag: &str) -> bool {
        self.mutate("remove_disabled")
            .activation
            .remove_disabled(tag)
    }

    pub(crate) fn set_active_switch(&self, on: bool) {
        let mut state = self.mutate("set_active_switch");
        contract!(
            on || state.activation.tags().is_empty(),
            "active switch turned off inside tag scope {:?}",
            state.activation.tags()
        );
        state.activation.set_active_switch(on);
    }

    fn assert_unlocked(&self, operation: &str) {
        contract!(!self.state.borrow().locked, "{operation} on a locked logger");
    }

    fn mutate(&self, operation: &str) -> RefMut<'_, State> {
        let state = self.state.borrow_mut();
        contract!(!state.locked, "{operation} on a locked logger");
        state
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Logger")
            .field("config", &state.config)
            .field("tags", &state.activation.tags())
            .field("enabled", state.activation.enabled())
            .field("disabled", state.activation.disabled())
            .field("active_switch", &state.activation.active_switch())
            .field("manual_switch", &state.activation.manual_switch())
            .field("is_active", &state.activation.is_active())
            .field("indent_level", &state.indentation.depth())
            .field("at_line_start", &state.lines.at_line_start())
            .field("autoflush", &state.autoflush)
            .field("locked", &state.locked)
            .finish_non_exhaustive()
    }
}

fn boxed_writer<W>(writer: W) -> Box<dyn Write>
where
    W: Write + 'static,
{
    Box::new(writer)
}
