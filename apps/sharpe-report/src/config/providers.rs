//! Data provider configuration: endpoints, credentials and HTTP behaviour.

use serde::{Deserialize, Serialize};

/// Which adapter supplies monthly prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceProvider {
    /// Yahoo Finance chart API (supports indices such as `^GSPC`).
    #[default]
    Yahoo,
    /// Alpaca market data bars API (equities only).
    Alpaca,
}

impl PriceProvider {
    /// Provider name as used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Alpaca => "alpaca",
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProvidersConfig {
    /// Price source.
    #[serde(default)]
    pub prices: PriceProvider,
    /// Yahoo chart API settings.
    #[serde(default)]
    pub yahoo: YahooConfig,
    /// Alpaca data API settings.
    #[serde(default)]
    pub alpaca: AlpacaConfig,
    /// FRED settings.
    #[serde(default)]
    pub fred: FredConfig,
    /// Shared HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Yahoo chart API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooConfig {
    /// Base URL for chart requests.
    #[serde(default = "default_yahoo_base_url")]
    pub base_url: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: default_yahoo_base_url(),
        }
    }
}

fn default_yahoo_base_url() -> String {
    "https://query1.finance.yahoo.com".to_string()
}

/// Alpaca market data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlpacaConfig {
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret.
    #[serde(default)]
    pub api_secret: String,
    /// Base URL for historical data.
    #[serde(default = "default_alpaca_data_url")]
    pub data_url: String,
    /// Data feed (`iex` or `sip`).
    #[serde(default = "default_alpaca_feed")]
    pub feed: String,
}

impl AlpacaConfig {
    /// True when both key and secret are set.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.api_secret.trim().is_empty()
    }
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            data_url: default_alpaca_data_url(),
            feed: default_alpaca_feed(),
        }
    }
}

fn default_alpaca_data_url() -> String {
    "https://data.alpaca.markets".to_string()
}

fn default_alpaca_feed() -> String {
    "iex".to_string()
}

/// FRED configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredConfig {
    /// Base URL for the CSV download endpoint.
    #[serde(default = "default_fred_base_url")]
    pub base_url: String,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            base_url: default_fred_base_url(),
        }
    }
}

fn default_fred_base_url() -> String {
    "https://fred.stlouisfed.org".to_string()
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Retry policy.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("sharpe-report/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Retry policy for transient HTTP failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First backoff delay in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Upper bound on a single backoff delay.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Backoff growth factor.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Random jitter as a fraction of the delay.
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            multiplier: default_multiplier(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_jitter_factor() -> f64 {
    0.1
}
