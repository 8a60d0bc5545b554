//! Logging setup and span constructors.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so that stdout stays reserved for daemon replies.
pub fn init(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span};

    /// Span for one inbound tracker event.
    pub fn event(kind: &'static str) -> Span {
        debug_span!("event", kind = %kind)
    }

    /// Span for one query answered by the daemon.
    pub fn query(kind: &'static str) -> Span {
        debug_span!("query", kind = %kind)
    }
}
