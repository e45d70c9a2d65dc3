//! crates/logging-sink/src/switch.rs
//! Process-wide toggle gating forwarding to standard output.

use std::sync::atomic::{AtomicBool, Ordering};

static STD_WRITE: AtomicBool = AtomicBool::new(true);

/// Reports whether sinks bound to standard output currently forward text.
#[must_use]
pub fn std_write_enabled() -> bool {
    STD_WRITE.load(Ordering::Relaxed)
}

/// Re-enables forwarding for every standard output sink in the process.
pub fn enable_std_write() {
    STD_WRITE.store(true, Ordering::Relaxed);
}

/// Stops every standard output sink in the process from forwarding text.
///
/// Sinks wrapping other writers are unaffected. The logger keeps buffering
/// as usual, so inspection through its buffers still works.
pub fn disable_std_write() {
    STD_WRITE.store(false, Ordering::Relaxed);
}

/// Sets the toggle and returns the value it replaced.
pub(crate) fn replace_std_write(enabled: bool) -> bool {
    STD_WRITE.swap(enabled, Ordering::Relaxed)
}
