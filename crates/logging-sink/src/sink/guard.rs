use crate::switch::replace_std_write;

/// RAII guard that silences standard output sinks for its lifetime.
///
/// Created by [`StdWriteGuard::disable`]. Dropping the guard restores whatever
/// the process-wide toggle held before, so nested guards unwind correctly when
/// dropped in reverse order of creation. The toggle is process-wide; guards
/// racing on several threads restore in unspecified order.
///
/// # Examples
///
/// ```
/// use linelog_sink::{StdWriteGuard, std_write_enabled};
///
/// {
///     let _quiet = StdWriteGuard::disable();
///     assert!(!std_write_enabled());
/// }
/// assert!(std_write_enabled());
/// ```
#[must_use = "dropping the guard immediately re-enables standard output"]
#[derive(Debug)]
pub struct StdWriteGuard {
    previous: Option<bool>,
}

impl StdWriteGuard {
    /// Disables standard output forwarding until the guard is dropped.
    pub fn disable() -> Self {
        Self {
            previous: Some(replace_std_write(false)),
        }
    }

    /// Returns the toggle value that will be restored on drop.
    #[must_use]
    pub fn previous_state(&self) -> Option<bool> {
        self.previous
    }

    /// Consumes the guard without restoring the previous toggle value.
    ///
    /// The disabled state becomes the new baseline; call
    /// [`enable_std_write`](crate::enable_std_write) to undo it later.
    pub fn persist(mut self) {
        self.previous = None;
    }
}

impl Drop for StdWriteGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            replace_std_write(previous);
        }
    }
}
