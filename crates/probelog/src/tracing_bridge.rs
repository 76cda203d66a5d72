//! crates/probelog/src/tracing_bridge.rs
//! Routes `tracing` events into the bounded logger.
//!
//! Libraries linked into a probe agent often log through `tracing`. This
//! module provides a subscriber layer that renders each event straight into a
//! [`MessageBuffer`](crate::MessageBuffer) and hands it to a [`Logger`]:
//!
//! - `ERROR` events take the error path with the event target as function
//!   name and the source line as line number. The policy is always empty, so
//!   a `tracing` event never terminates the process.
//! - All other levels take the timestamped info path.
//!
//! The logger itself never emits `tracing` events, so the bridge cannot loop.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::hooks::ProcessHooks;
use crate::logger::Logger;
use crate::policy::TerminationPolicy;

/// A tracing layer that writes events through a [`Logger`].
pub struct ProbeLayer<H: 'static> {
    logger: &'static Logger<'static, H>,
}

impl<H: ProcessHooks + 'static> ProbeLayer<H> {
    /// Creates a layer writing through `logger`.
    #[must_use]
    pub const fn new(logger: &'static Logger<'static, H>) -> Self {
        Self { logger }
    }

    /// Returns the logger events are written through.
    #[must_use]
    pub const fn logger(&self) -> &'static Logger<'static, H> {
        self.logger
    }
}

impl<H: ProcessHooks + 'static> fmt::Debug for ProbeLayer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeLayer")
            .field("logger", self.logger)
            .finish()
    }
}

impl<S, H> Layer<S> for ProbeLayer<H>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    H: ProcessHooks + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let message = EventMessage(event);

        if *metadata.level() == Level::ERROR {
            self.logger.error(
                TerminationPolicy::EMPTY,
                metadata.target(),
                metadata.line().unwrap_or(0),
                format_args!("{message}"),
            );
        } else {
            self.logger.info(format_args!("{message}"));
        }
    }
}

/// Renders an event's fields without allocating: the `message` field first,
/// then every other field as ` name=value`.
struct EventMessage<'a, 'e>(&'a Event<'e>);

impl fmt::Display for EventMessage<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = FieldWriter {
            out: f,
            fields: false,
            result: Ok(()),
        };
        self.0.record(&mut visitor);
        visitor.fields = true;
        self.0.record(&mut visitor);
        visitor.result
    }
}

struct FieldWriter<'a, 'f> {
    out: &'a mut fmt::Formatter<'f>,
    /// `false` while writing the message, `true` while writing other fields.
    fields: bool,
    result: fmt::Result,
}

impl FieldWriter<'_, '_> {
    fn write(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if self.result.is_err() {
            return;
        }
        let is_message = field.name() == "message";
        self.result = match (self.fields, is_message) {
            (false, true) => self.out.write_fmt(value),
            (true, false) => write!(self.out, " {}={}", field.name(), value),
            _ => Ok(()),
        };
    }
}

impl Visit for FieldWriter<'_, '_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.write(field, format_args!("{value}"));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.write(field, format_args!("{value:?}"));
    }
}

/// Installs a [`ProbeLayer`] writing through `logger` as the global default
/// subscriber.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init_tracing<H: ProcessHooks + 'static>(
    logger: &'static Logger<'static, H>,
) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(ProbeLayer::new(logger))
        .try_init()
}
