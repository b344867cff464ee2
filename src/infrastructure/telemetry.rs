//! # Telemetry
//!
//! Tracing subscriber setup with two output modes:
//! - **JSON** (`json = true`): one JSON object per line for log aggregation.
//! - **Pretty** (`json = false`): human-readable output for local runs.
//!
//! `RUST_LOG` wins over the configured default level when set.

use crate::infrastructure::config::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already set.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if settings.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true);
        registry.with(json_layer).try_init()
    } else {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        registry.with(pretty_layer).try_init()
    }
}
