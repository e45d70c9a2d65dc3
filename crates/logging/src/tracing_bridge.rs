//! crates/logging/src/tracing_bridge.rs
//! Bridge from the `tracing` ecosystem into the per-thread default logger.
//!
//! [`LoggerLayer`] is a `tracing-subscriber` layer that renders each event as
//! one logger line, `"<LEVEL> <message> [field=value ...]"`, written inside a
//! tag scope named after the event target. Tag selections therefore filter
//! tracing output exactly like direct writes: disabling `"app::net"` silences
//! events emitted with that target. Entering a span indents by one level and
//! leaving it undoes that.
//!
//! Events and spans whose target is `linelog` or lives under `linelog::` are
//! the logger's own diagnostics and are ignored, so the bridge never feeds
//! the logger back into itself.
//!
//! # Usage
//!
//! ```rust,ignore
//! use linelog::{global, init_tracing, LoggerConfig};
//!
//! global::init(LoggerConfig::default());
//! init_tracing().expect("no other global subscriber");
//!
//! let _net = global::disable_tag("app::net");
//! tracing::info!(target: "app::net", "suppressed");
//! tracing::info!(target: "app::db", "written");
//! ```

use std::fmt::{self, Write as _};

use tracing::span::Id;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::global;

const INTERNAL_TARGET: &str = "linelog";

/// A tracing layer that writes events to the emitting thread's default logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggerLayer {
    _private: (),
}

impl LoggerLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn is_internal(target: &str) -> bool {
        target
            .strip_prefix(INTERNAL_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }

    fn span_target<S>(id: &Id, ctx: &Context<'_, S>) -> Option<&'static str>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        ctx.metadata(id).map(|metadata| metadata.target())
    }

    fn adjust_indent<S>(id: &Id, ctx: &Context<'_, S>, delta: isize)
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let Some(target) = Self::span_target(id, ctx) else {
            return;
        };
        if Self::is_internal(target) {
            return;
        }
        let logger = global::logger();
        if !logger.is_locked() {
            logger.add_indent_level(delta);
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        if Self::is_internal(target) {
            return;
        }

        let logger = global::logger();
        if logger.is_locked() {
            return;
        }

        let _scope = logger.tag(target);
        if !logger.allows_output() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        write!(logger, "{} {}", metadata.level(), visitor.message);
        logger.log(visitor.fields.as_str()).log("\n");
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        Self::adjust_indent(id, &ctx, 1);
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        Self::adjust_indent(id, &ctx, -1);
    }
}

/// Visitor collecting the message and the remaining fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Installs [`LoggerLayer`] as the global tracing subscriber.
///
/// Fails when another global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new())
        .try_init()
}

/// Installs [`LoggerLayer`] behind `filter` as the global tracing subscriber.
///
/// # Example
///
/// ```rust,ignore
/// use linelog::init_tracing_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(EnvFilter::from_default_env()).expect("subscriber installed");
/// ```
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Logger;
    use tracing_subscriber::layer::SubscriberExt;

    fn with_layer<F: FnOnce()>(f: F) {
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new());
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn internal_targets_are_recognized() {
        assert!(LoggerLayer::is_internal("linelog"));
        assert!(LoggerLayer::is_internal("linelog::guard"));
        assert!(!LoggerLayer::is_internal("linelogger"));
        assert!(!LoggerLayer::is_internal("app::linelog"));
    }

    #[test]
    fn event_becomes_one_line() {
        let logger = global::install(Logger::for_tests());
        with_layer(|| {
            tracing::info!(target: "app::net", "connected");
            tracing::warn!(target: "app::net", peer = 7, "slow");
        });
        assert_eq!(
            logger.total_buffer(),
            "INFO connected\nWARN slow peer=7\n"
        );
        assert!(logger.tags().is_empty());
    }

    #[test]
    fn disabled_target_is_filtered() {
        let logger = global::install(Logger::for_tests());
        with_layer(|| {
            let _off = logger.disable_tag("app::noisy");
            tracing::info!(target: "app::noisy", "hidden");
            tracing::info!(target: "app::calm", "shown");
        });
        assert_eq!(logger.total_buffer(), "INFO shown\n");
    }

    #[test]
    fn spans_indent_their_events() {
        let logger = global::install(Logger::for_tests());
        with_layer(|| {
            let span = tracing::info_span!(target: "app", "work");
            {
                let _entered = span.enter();
                tracing::info!(target: "app", "inside");
            }
            tracing::info!(target: "app", "outside");
        });
        assert_eq!(logger.total_buffer(), "|   INFO inside\nINFO outside\n");
        assert_eq!(logger.indent_level(), 0);
    }

    #[test]
    fn locked_logger_is_left_alone() {
        let logger = global::install(Logger::for_tests());
        logger.lock();
        with_layer(|| {
            tracing::info!(target: "app", "dropped");
        });
        logger.unlock();
        assert_eq!(logger.total_buffer(), "");
    }
}
