//! Configuration module for the Sharpe report.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the analysis, data providers and report output.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sharpe_report::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("tickers: {:?}", config.analysis.tickers);
//! ```

mod analysis;
mod observability;
mod providers;
mod report;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analysis::AnalysisConfig;
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use providers::{
    AlpacaConfig, FredConfig, HttpConfig, PriceProvider, ProvidersConfig, RetryConfig, YahooConfig,
};
pub use report::ReportConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}'")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Analysis parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Data provider configuration.
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Report output configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// An empty document yields the built-in defaults.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. A missing variable
/// without a default becomes an empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
pub fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` describing the first invalid field.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let analysis = &config.analysis;

    if analysis.tickers.iter().all(|t| t.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "analysis.tickers must contain at least one ticker".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for symbol in analysis.symbols() {
        if symbol.as_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.tickers must not contain empty entries".to_string(),
            ));
        }
        if !seen.insert(symbol.clone()) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.tickers contains duplicate ticker {symbol}"
            )));
        }
    }

    if analysis.start_date >= analysis.end_date {
        return Err(ConfigError::ValidationError(
            "analysis.start_date must be before analysis.end_date".to_string(),
        ));
    }

    if analysis.periods_per_year == 0 {
        return Err(ConfigError::ValidationError(
            "analysis.periods_per_year must be positive".to_string(),
        ));
    }

    if analysis.risk_free_series.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.risk_free_series must not be empty".to_string(),
        ));
    }

    let valid_formats = ["pretty", "json"];
    let format = config.observability.logging.format.to_ascii_lowercase();
    if !valid_formats.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    if config.providers.prices == PriceProvider::Alpaca && !config.providers.alpaca.has_credentials()
    {
        return Err(ConfigError::ValidationError(
            "providers.alpaca.api_key and api_secret are required when providers.prices is alpaca"
                .to_string(),
        ));
    }

    let retry = &config.providers.http.retry;
    if retry.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "providers.http.retry.max_attempts must be at least 1".to_string(),
        ));
    }

    if retry.multiplier < 1.0 {
        return Err(ConfigError::ValidationError(
            "providers.http.retry.multiplier must be at least 1.0".to_string(),
        ));
    }

    if !(0.0..1.0).contains(&retry.jitter_factor) {
        return Err(ConfigError::ValidationError(
            "providers.http.retry.jitter_factor must be between 0.0 and 1.0".to_string(),
        ));
    }

    if config.providers.http.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "providers.http.timeout_secs must be positive".to_string(),
        ));
    }

    Ok(())
}
