//! Tracing subscriber setup for the command-line tool.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(String),
}

/// Installs a stderr `fmt` subscriber filtered by `directives`.
pub fn init(directives: &str) -> Result<(), TelemetryError> {
    let filter =
        EnvFilter::try_new(directives).map_err(|error| TelemetryError::Filter(error.to_string()))?;

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        // Keep colour codes out of redirected output.
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|error| TelemetryError::Subscriber(error.to_string()))
}
