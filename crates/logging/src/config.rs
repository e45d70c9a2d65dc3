//! crates/logging/src/config.rs
//! Logger construction settings and textual tag selections.

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::guard::ScopeStack;
use crate::logger::Logger;

/// Construction settings for a [`Logger`].
///
/// The default suits interactive use: timestamps on, the total buffer cleared
/// by every flush, one flush per completed line. [`LoggerConfig::test`] is the
/// diagnostic mode used by tests, which keeps everything written in the total
/// buffer for inspection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerConfig {
    /// Prefix each line with `[HH:MM:SS] `.
    pub timestamps: bool,
    /// Keep the total buffer across flushes.
    pub retain_output: bool,
    /// Flush after every completed line.
    pub autoflush: bool,
}

impl LoggerConfig {
    /// Diagnostic mode: no timestamps, retained output.
    #[must_use]
    pub const fn test() -> Self {
        Self {
            timestamps: false,
            retain_output: true,
            autoflush: true,
        }
    }

    /// Sets whether lines carry a timestamp prefix.
    #[must_use]
    pub const fn timestamps(mut self, on: bool) -> Self {
        self.timestamps = on;
        self
    }

    /// Sets whether the total buffer survives a flush.
    #[must_use]
    pub const fn retain_output(mut self, on: bool) -> Self {
        self.retain_output = on;
        self
    }

    /// Sets the initial autoflush state.
    #[must_use]
    pub const fn autoflush(mut self, on: bool) -> Self {
        self.autoflush = on;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            timestamps: true,
            retain_output: false,
            autoflush: true,
        }
    }
}

/// A set of tag switches parsed from text such as `"net,-db,quiet"`.
///
/// Entries are comma separated:
///
/// - `name` or `+name` enables the tag;
/// - `-name` disables the tag;
/// - `quiet` suppresses untagged output.
///
/// The selection does not touch a logger by itself. [`apply`](Self::apply)
/// opens one guard per switch and returns them as a [`ScopeStack`], so the
/// switches last exactly as long as the stack.
///
/// ```
/// use linelog::{Logger, TagSelection};
///
/// let logger = Logger::for_tests();
/// let selection: TagSelection = "net,quiet".parse().unwrap();
/// {
///     let _applied = selection.apply(&logger);
///     logger.log("hidden\n");
///     let _net = logger.tag("net");
///     logger.log("shown\n");
/// }
/// logger.log("back\n");
/// assert_eq!(logger.total_buffer(), "shown\nback\n");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagSelection {
    /// Tags to add to the enabled set.
    pub enabled: BTreeSet<String>,
    /// Tags to add to the disabled set.
    pub disabled: BTreeSet<String>,
    /// Whether untagged output is suppressed.
    pub suppress: bool,
}

impl TagSelection {
    /// Keyword that turns on suppression.
    pub const QUIET: &'static str = "quiet";

    /// Parses a comma-separated selection. Surrounding whitespace around
    /// entries is ignored and an entirely blank input is an empty selection.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut selection = Self::default();
        if text.trim().is_empty() {
            return Ok(selection);
        }
        for (position, entry) in text.split(',').enumerate() {
            selection.apply_entry(position, entry.trim())?;
        }
        Ok(selection)
    }

    /// Reads and parses the environment variable `name`.
    ///
    /// Returns `Ok(None)` when the variable is unset or not valid Unicode.
    pub fn from_env(name: &str) -> Result<Option<Self>, ConfigError> {
        env::var(name).ok().map(|value| Self::parse(&value)).transpose()
    }

    /// Reports whether the selection changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.disabled.is_empty() && !self.suppress
    }

    /// Opens enable guards, then disable guards, then the suppress guard.
    ///
    /// Suppression is a contract violation inside a tag scope, so apply
    /// selections that contain `quiet` before entering any tag.
    pub fn apply<'a>(&self, logger: &'a Logger) -> ScopeStack<'a> {
        let mut stack = ScopeStack::new();
        stack.extend(self.enabled.iter().map(|tag| logger.enable_tag(tag.as_str())));
        stack.extend(self.disabled.iter().map(|tag| logger.disable_tag(tag.as_str())));
        if self.suppress {
            stack.push(logger.suppress());
        }
        tracing::debug!(
            target: "linelog::config",
            enabled = self.enabled.len(),
            disabled = self.disabled.len(),
            suppress = self.suppress,
            "tag selection applied"
        );
        stack
    }

    fn apply_entry(&mut self, position: usize, entry: &str) -> Result<(), ConfigError> {
        if entry.is_empty() {
            return Err(ConfigError::EmptyEntry { position });
        }
        if entry == Self::QUIET {
            self.suppress = true;
            return Ok(());
        }

        let (name, disable) = match entry.strip_prefix('-') {
            Some(name) => (name, true),
            None => (entry.strip_prefix('+').unwrap_or(entry), false),
        };
        if name.is_empty() {
            return Err(ConfigError::MissingTagName {
                entry: entry.to_owned(),
            });
        }
        validate_tag_name(name)?;

        let target = if disable {
            &mut self.disabled
        } else {
            &mut self.enabled
        };
        target.insert(name.to_owned());
        Ok(())
    }
}

fn validate_tag_name(name: &str) -> Result<(), ConfigError> {
    let invalid = name.starts_with(['+', '-']) || name.chars().any(char::is_whitespace);
    if invalid {
        return Err(ConfigError::InvalidTagName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

impl FromStr for TagSelection {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl fmt::Display for TagSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .enabled
            .iter()
            .map(|tag| format!("+{tag}"))
            .chain(self.disabled.iter().map(|tag| format!("-{tag}")))
            .chain(self.suppress.then(|| Self::QUIET.to_owned()));
        for (index, entry) in entries.enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(&entry)?;
        }
        Ok(())
    }
}
