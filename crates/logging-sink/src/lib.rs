#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `linelog-sink` provides the output side of the `linelog` logger: a
//! [`TextSink`] wrapping any [`std::io::Write`] implementor, the process-wide
//! toggle that silences sinks bound to standard output, and a
//! [`SharedBuffer`] writer for capturing forwarded text in tests.
//!
//! # Design
//!
//! The logger accumulates text in its own buffers and hands completed chunks
//! to a sink on flush. A sink writes each chunk with a single `write_all`
//! followed by a writer flush. Sinks created through [`TextSink::stdout`] use
//! [`SinkGate::StdWriteToggle`] and consult [`std_write_enabled`] before every
//! chunk; sinks around other writers use [`SinkGate::Always`]. The toggle is
//! an atomic flag and is the only state in the workspace shared between
//! threads.
//!
//! # Invariants
//!
//! - A sink never reorders or rewrites text: bytes reach the writer exactly as
//!   forwarded.
//! - [`TextSink::bytes_written`] counts only bytes that reached the writer.
//! - [`StdWriteGuard`] restores the toggle value it replaced.
//!
//! # Errors
//!
//! [`TextSink::forward`] surfaces [`std::io::Error`] values from the writer
//! unchanged. The logger records them rather than failing the write call.
//!
//! # Examples
//!
//! ```
//! use linelog_sink::{Forwarded, SharedBuffer, TextSink};
//!
//! let capture = SharedBuffer::new();
//! let mut sink = TextSink::new(capture.clone());
//! assert_eq!(sink.forward("first\n")?, Forwarded::Written(6));
//! sink.forward("second\n")?;
//! assert_eq!(capture.contents(), "first\nsecond\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # See also
//!
//! - `linelog` for the buffering logger, tag scopes and guards.

mod capture;
mod sink;
mod switch;

pub use capture::SharedBuffer;
pub use sink::{Forwarded, SinkGate, StdWriteGuard, TextSink};
pub use switch::{disable_std_write, enable_std_write, std_write_enabled};
