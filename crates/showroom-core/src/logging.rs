//! Logging integration for showroom.
//!
//! Every controller runs inside a [`form_span`] carrying the form id and the
//! country it collects numbers for. [`setup_logging`] installs a subscriber
//! that keeps those span fields on each event: the pretty format prints the
//! span context under the event, and the JSON format copies the current span
//! into a `span` object on every line.

use std::io;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::settings::Settings;

/// Name of the span opened by [`form_span`].
pub const FORM_SPAN: &str = "form";

/// Installs the global subscriber described by `settings`.
///
/// `settings.log_level` is an `EnvFilter` directive such as `"debug"` or
/// `"showroom_forms=trace"`; one that does not parse falls back to `info`.
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is left alone.
pub fn setup_logging(settings: &Settings) -> bool {
    let (filter, rejected) = match EnvFilter::try_new(&settings.log_level) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    let installed = if settings.debug {
        tracing_subscriber::registry()
            .with(filter)
            .with(pretty_layer())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer(io::stdout))
            .try_init()
            .is_ok()
    };

    if let Some(err) = rejected {
        tracing::warn!(directive = %settings.log_level, error = %err, "invalid log level, using info");
    }
    installed
}

fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .pretty()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

/// One JSON object per event, with the innermost span's fields under `span`.
fn json_layer<S, W>(make_writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(make_writer)
}

/// Creates the span one mounted form instruments its work with.
///
/// # Examples
///
/// ```
/// use showroom_core::logging::form_span;
///
/// let span = form_span("contact", "India");
/// let _guard = span.enter();
/// tracing::info!("form mounted");
/// ```
pub fn form_span(form_id: &str, country: &str) -> tracing::Span {
    tracing::info_span!(FORM_SPAN, id = form_id, country = country)
}
