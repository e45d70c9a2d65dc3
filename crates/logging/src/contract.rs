//! crates/logging/src/contract.rs
//! Debug-only checks for logger usage contracts.
//!
//! Violations such as popping a tag out of order or suppressing output inside
//! a tag scope are programming errors, not runtime conditions. They panic in
//! builds with `debug_assertions` and compile to nothing otherwise.

/// Panics with a contract-violation message when `cond` is false.
///
/// The condition is not evaluated at all without `debug_assertions`.
macro_rules! contract {
    ($cond:expr, $($msg:tt)+) => {
        if cfg!(debug_assertions) && !$cond {
            panic!("linelog contract violation: {}", format_args!($($msg)+));
        }
    };
}

pub(crate) use contract;
