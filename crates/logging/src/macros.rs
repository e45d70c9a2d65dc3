//! crates/logging/src/macros.rs
//! Formatting macros that write to the per-thread default logger.

/// Writes formatted text to the current thread's default logger.
///
/// Nothing is formatted while the logger is inactive.
///
/// # Example
/// ```
/// linelog::global::install(linelog::Logger::for_tests());
/// linelog::log!("{} of {}", 1, 2);
/// linelog::log!("\n");
/// assert_eq!(linelog::global::logger().total_buffer(), "1 of 2\n");
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::global::logger().write_fmt(::core::format_args!($($arg)*))
    };
}

/// Like [`log!`], followed by a newline.
///
/// # Example
/// ```
/// linelog::global::install(linelog::Logger::for_tests());
/// linelog::logln!("ready");
/// linelog::logln!();
/// assert_eq!(linelog::global::logger().total_buffer(), "ready\n\n");
/// ```
#[macro_export]
macro_rules! logln {
    () => {
        $crate::global::logger().write_fmt(::core::format_args!("\n"))
    };
    ($($arg:tt)*) => {
        $crate::global::logger().write_fmt(::core::format_args!(
            "{}\n",
            ::core::format_args!($($arg)*)
        ))
    };
}

#[cfg(test)]
mod tests {
    use crate::{Logger, global};

    #[test]
    fn log_and_logln_share_one_line() {
        let logger = global::install(Logger::for_tests());
        crate::log!("a={}", 1);
        crate::logln!(", b={}", 2);
        assert_eq!(logger.total_buffer(), "a=1, b=2\n");
    }

    #[test]
    fn disabled_logger_skips_formatting() {
        use std::cell::Cell;
        use std::fmt;

        struct Counted<'a>(&'a Cell<u32>);

        impl fmt::Display for Counted<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.set(self.0.get() + 1);
                f.write_str("x")
            }
        }

        let logger = global::install(Logger::for_tests());
        let calls = Cell::new(0);
        logger.manual_deactivate();
        crate::logln!("{}", Counted(&calls));
        assert_eq!(calls.get(), 0);

        logger.manual_activate();
        crate::logln!("{}", Counted(&calls));
        assert_eq!(calls.get(), 1);
        assert_eq!(logger.total_buffer(), "x\n");
    }
}
