#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `linelog` is a buffered, line-oriented text logger whose output is gated
//! by tag scopes. Code marks regions with tags (`"net"`, `"parser"`), and a
//! pair of global tag sets decides which of those regions produce output.
//! Indentation, suppression and output batching are likewise controlled by
//! scope guards that undo their change when they go out of scope, so nested
//! and early-returning code always leaves the logger as it found it.
//!
//! # Design
//!
//! - [`Logger`] owns the line buffer, the total buffer of completed lines,
//!   the tag stack with the enabled and disabled sets, the indent depth and
//!   an output [`TextSink`](linelog_sink::TextSink). All methods take `&self`;
//!   state sits behind `RefCell`, which makes a logger `!Sync` and confines
//!   it to one thread.
//! - Whether a write has any effect is decided by the manual switch and then
//!   by the innermost entered tag: with the active switch on, output appears
//!   unless that tag is disabled; with it off (inside
//!   [`suppress`](Logger::suppress)), output appears only if that tag is
//!   enabled. With no tag entered the active switch alone decides.
//! - [`ScopeGuard`] is the only way tag state changes. Guards close on drop
//!   or explicitly through [`ScopeClose`]; [`ScopeStack`] closes a group in
//!   reverse order.
//! - Text is split on newlines. Each physical line gets an optional
//!   `[HH:MM:SS] ` prefix and one [`INDENT_UNIT`] per indent level. Completed
//!   lines go to an optional observer and into the total buffer, which
//!   [`Logger::flush`] forwards to the sink.
//! - [`global`] keeps a default logger per thread, used by [`log!`],
//!   [`logln!`] and, with the `subscriber` feature, by `LoggerLayer`, which
//!   routes `tracing` events into it.
//!
//! # Invariants
//!
//! - Tag pushes and pops follow guard open and close order.
//! - The indent depth never goes below zero.
//! - The active switch is never turned off while a tag is entered.
//! - An enable or disable guard removes its tag on close only if it was the
//!   guard that inserted it.
//!
//! # Errors
//!
//! Misuse such as closing tag scopes out of order, suppressing inside a tag
//! scope or mutating a locked logger panics with a
//! `linelog contract violation` message in builds with debug assertions and
//! is unchecked otherwise. Sink I/O failures never fail a write; they are
//! kept for [`Logger::take_sink_error`]. Parsing a [`TagSelection`] reports
//! [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use linelog::{Flush, Logger};
//!
//! let logger = Logger::for_tests();
//! logger.log("start\n");
//! {
//!     let _net = logger.tag("net");
//!     let _indent = logger.indent();
//!     logger.log("connecting to ").log("db").log(Flush);
//!     logger.log(" ... ok\n");
//! }
//! {
//!     let _quiet = logger.disable_tag("net");
//!     let _net = logger.tag("net");
//!     logger.log("hidden\n");
//! }
//! assert_eq!(
//!     logger.total_buffer(),
//!     "start\n|   connecting to db ... ok\n"
//! );
//! ```
//!
//! # See also
//!
//! - [`linelog_sink`] for the output sink and the standard output toggle.

mod activation;
mod config;
mod contract;
mod error;
mod guard;
mod indent;
mod line_buffer;
mod logger;
mod macros;
mod timestamp;
#[cfg(feature = "subscriber")]
mod tracing_bridge;
mod value;

pub mod global;

pub use config::{LoggerConfig, TagSelection};
pub use error::ConfigError;
pub use guard::{Scope, ScopeClose, ScopeGuard, ScopeStack};
pub use indent::INDENT_UNIT;
pub use logger::Logger;
pub use value::{Flush, Fragment, LogValue};

pub use linelog_sink::{
    SharedBuffer, StdWriteGuard, TextSink, disable_std_write, enable_std_write, std_write_enabled,
};

#[cfg(feature = "subscriber")]
pub use tracing_bridge::{LoggerLayer, init_tracing, init_tracing_with_filter};
