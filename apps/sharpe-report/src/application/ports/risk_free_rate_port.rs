//! Risk-Free Rate Port (Driven Port)
//!
//! Interface for downloading a benchmark interest rate series.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::price_history_port::MarketDataError;
use crate::domain::series::RateSeries;

/// Port for downloading risk-free rate observations.
#[async_trait]
pub trait RiskFreeRatePort: Send + Sync {
    /// Fetch observations for `series_id` between `start` and `end` (inclusive).
    ///
    /// Values are returned as annualized fractions.
    async fn fetch_rate_series(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketDataError>;
}
