//! crates/logging/src/global.rs
//! Per-thread default logger and guard shortcuts bound to it.
//!
//! Each thread lazily gets its own default [`Logger`] on first use. The
//! instance is leaked so guards can borrow it for `'static`; installing a new
//! default leaks the replacement as well and leaves the previous one valid for
//! any guards still holding it.

use std::cell::Cell;

use crate::config::LoggerConfig;
use crate::guard::ScopeGuard;
use crate::logger::Logger;

thread_local! {
    static DEFAULT: Cell<Option<&'static Logger>> = const { Cell::new(None) };
}

/// Returns this thread's default logger, creating it with
/// [`LoggerConfig::default`] on first use.
pub fn logger() -> &'static Logger {
    DEFAULT.with(|slot| match slot.get() {
        Some(logger) => logger,
        None => {
            let logger: &'static Logger = Box::leak(Box::new(Logger::new()));
            slot.set(Some(logger));
            logger
        }
    })
}

/// Makes `logger` this thread's default and returns it.
pub fn install(logger: Logger) -> &'static Logger {
    let logger: &'static Logger = Box::leak(Box::new(logger));
    DEFAULT.with(|slot| slot.set(Some(logger)));
    tracing::debug!(target: "linelog::global", config = ?logger.config(), "default logger installed");
    logger
}

/// Installs a default logger built from `config` and returns it.
pub fn init(config: LoggerConfig) -> &'static Logger {
    install(Logger::with_config(config))
}

/// Reports whether this thread already has a default logger.
pub fn is_initialized() -> bool {
    DEFAULT.with(|slot| slot.get().is_some())
}

/// Flushes the default logger.
pub fn flush() {
    logger().flush();
}

/// [`Logger::indent`] on the default logger.
pub fn indent() -> ScopeGuard<'static> {
    logger().indent()
}

/// [`Logger::indent_by`] on the default logger.
pub fn indent_by(levels: usize) -> ScopeGuard<'static> {
    logger().indent_by(levels)
}

/// [`Logger::indent_if`] on the default logger.
pub fn indent_if(condition: bool) -> ScopeGuard<'static> {
    logger().indent_if(condition)
}

/// [`Logger::suppress`] on the default logger.
pub fn suppress() -> ScopeGuard<'static> {
    logger().suppress()
}

/// [`Logger::suppress_if`] on the default logger.
pub fn suppress_if(condition: bool) -> ScopeGuard<'static> {
    logger().suppress_if(condition)
}

/// [`Logger::tag`] on the default logger.
pub fn tag(tag: impl Into<String>) -> ScopeGuard<'static> {
    logger().tag(tag)
}

/// [`Logger::tag_if`] on the default logger.
pub fn tag_if(condition: bool, tag: impl Into<String>) -> ScopeGuard<'static> {
    logger().tag_if(condition, tag)
}

/// [`Logger::enable_tag`] on the default logger.
pub fn enable_tag(tag: impl Into<String>) -> ScopeGuard<'static> {
    logger().enable_tag(tag)
}

/// [`Logger::disable_tag`] on the default logger.
pub fn disable_tag(tag: impl Into<String>) -> ScopeGuard<'static> {
    logger().disable_tag(tag)
}

/// [`Logger::large_block`] on the default logger.
pub fn large_block() -> ScopeGuard<'static> {
    logger().large_block()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn logger_is_stable_per_thread() {
        let first = logger();
        let second = logger();
        assert!(std::ptr::eq(first, second));
        assert!(is_initialized());
    }

    #[test]
    fn install_replaces_default() {
        let installed = install(Logger::for_tests());
        assert!(std::ptr::eq(logger(), installed));

        installed.log("via install\n");
        assert_eq!(logger().total_buffer(), "via install\n");
    }

    #[test]
    fn shortcuts_target_default_logger() {
        let logger = install(Logger::for_tests());
        {
            let _tag = tag("t");
            let _indent = indent();
            assert_eq!(logger.tags(), ["t"]);
            assert_eq!(logger.indent_level(), 1);
        }
        assert!(logger.tags().is_empty());
        assert_eq!(logger.indent_level(), 0);
    }

    #[test]
    fn threads_have_separate_defaults() {
        install(Logger::for_tests()).log("main\n");
        let other = thread::spawn(|| {
            let logger = install(Logger::for_tests());
            logger.log("worker\n");
            logger.total_buffer()
        })
        .join()
        .expect("worker thread");
        assert_eq!(other, "worker\n");
        assert_eq!(logger().total_buffer(), "main\n");
    }

    #[test]
    fn fresh_thread_starts_uninitialized() {
        let initialized = thread::spawn(is_initialized).join().expect("worker thread");
        assert!(!initialized);
    }
}
