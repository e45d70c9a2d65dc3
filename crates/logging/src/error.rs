//! crates/logging/src/error.rs
//! Errors reported while parsing logger configuration.

use thiserror::Error;

/// Failure to parse a [`TagSelection`](crate::TagSelection).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Two separators with nothing between them, or a leading/trailing separator.
    #[error("empty entry at position {position} in tag selection")]
    EmptyEntry {
        /// Zero-based index of the entry.
        position: usize,
    },
    /// A `+` or `-` sign without a tag name after it.
    #[error("tag selection entry '{entry}' has no tag name")]
    MissingTagName {
        /// The offending entry as written.
        entry: String,
    },
    /// A tag name containing whitespace or a second sign.
    #[error("invalid tag name '{name}'")]
    InvalidTagName {
        /// The rejected name.
        name: String,
    },
}
