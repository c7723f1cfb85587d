//! Price History Port (Driven Port)
//!
//! Interface for downloading monthly closing prices from a market-data provider.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::series::PriceTable;
use crate::domain::shared::Symbol;

/// Market data error shared by the outbound data ports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Authentication failed.
    #[error("Market data authentication failed")]
    AuthenticationFailed,

    /// Symbol not found.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// Data series not found.
    #[error("Series not found: {series}")]
    SeriesNotFound {
        /// The unknown series identifier.
        series: String,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Provider returned a body we could not interpret.
    #[error("Invalid market data response: {message}")]
    InvalidResponse {
        /// Error details.
        message: String,
    },

    /// API error.
    #[error("Market data API error: {message}")]
    ApiError {
        /// Error details.
        message: String,
    },
}

/// Port for downloading monthly price history.
#[async_trait]
pub trait PriceHistoryPort: Send + Sync {
    /// Fetch month-start closing prices for `symbols` in `[start, end)`.
    ///
    /// Symbols the provider does not know are omitted from the returned
    /// table rather than failing the whole request.
    async fn fetch_monthly_closes(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceTable, MarketDataError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;
}
