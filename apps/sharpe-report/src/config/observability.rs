//! Logging settings for the batch run.
//!
//! The report itself goes to stdout; everything configured here only affects
//! the diagnostic stream on stderr.

use serde::{Deserialize, Serialize};

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Diagnostic log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (`info`, `sharpe_report=debug`, ...), used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` for terminals, `json` for log collectors.
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Colorize pretty output. Ignored for JSON.
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

impl LoggingConfig {
    /// True when JSON output is selected.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            ansi: default_ansi(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_ansi() -> bool {
    true
}
