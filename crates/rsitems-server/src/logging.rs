//! Logging initialization.
//!
//! Wires the `logging` section of [`ServerConfig`](crate::config::ServerConfig)
//! into a global `tracing` subscriber: JSON output for production, pretty
//! text for development. `RUST_LOG` always wins over the configured level.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// Installs the global subscriber from the logging settings.
///
/// Call once at startup. Repeated calls are no-ops because the first
/// subscriber stays installed.
pub fn init_logging(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.clone()));

    if settings.json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_current_span(true));
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_target(true));
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
