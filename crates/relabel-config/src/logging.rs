//! Tracing setup for the relabel binary.
//!
//! Logs go to stderr only. Commands print their JSON results on stdout, and
//! a log line there would corrupt them.

use crate::{LogFormat, LoggingConfig, RelabelConfig};
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Names the output format and wins over `logging.format`
pub const FORMAT_OVERRIDE_VAR: &str = "LOG_FORMAT";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` directives are honoured on top of `logging.level`. Calling
/// this when a subscriber is already installed leaves the existing one in
/// place.
pub fn initialize(config: &RelabelConfig) {
    let format = std::env::var(FORMAT_OVERRIDE_VAR)
        .ok()
        .and_then(|value| parse_format(&value))
        .unwrap_or_else(|| config.logging.format.clone());

    let installed = tracing_subscriber::registry()
        .with(stderr_layer(&format, filter(&config.logging)))
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Keeping the subscriber that was already installed");
    }
}

fn filter(logging: &LoggingConfig) -> EnvFilter {
    let level = logging.level.parse().unwrap_or(Level::INFO);
    EnvFilter::from_default_env().add_directive(level.into())
}

fn stderr_layer(format: &LogFormat, filter: EnvFilter) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

fn parse_format(value: &str) -> Option<LogFormat> {
    match value.to_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" | "human" => Some(LogFormat::Pretty),
        _ => None,
    }
}

/// Span tagging every event of one command with its buffer and operation
pub fn request_span(buffer_id: &str, operation: &str) -> tracing::Span {
    tracing::info_span!("refactor_request", buffer = %buffer_id, operation = %operation)
}
