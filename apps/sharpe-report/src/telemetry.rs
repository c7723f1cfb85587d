//! Tracing Setup
//!
//! Console logging via `tracing-subscriber`. Logs go to stderr so stdout
//! carries only the report.
//!
//! # Configuration
//!
//! - `RUST_LOG`: standard filter directives; overrides `observability.logging.level`
//! - `observability.logging.format`: `pretty` (human) or `json`
//!
//! # Usage
//!
//! ```rust,ignore
//! use sharpe_report::telemetry::init_tracing;
//!
//! init_tracing(&config.observability.logging)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::LoggingConfig;

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
#[must_use]
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    init_tracing_with_writer(config, std::io::stderr)
}

/// Install the global tracing subscriber writing to `writer`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing_with_writer<W>(config: &LoggingConfig, writer: W) -> Result<(), TelemetryError>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer);

    if config.is_json() {
        builder
            .with_ansi(false)
            .json()
            .with_current_span(false)
            .try_init()
    } else {
        builder.with_ansi(config.ansi).with_target(false).try_init()
    }
}
