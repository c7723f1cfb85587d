//! Analyze Sharpe Use Case
//!
//! Downloads prices and the risk-free benchmark, derives monthly log returns
//! and evaluates each requested instrument.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::application::dto::{AnalysisRequest, SharpeReport};
use crate::application::ports::{MarketDataError, PriceHistoryPort, RiskFreeRatePort};
use crate::domain::metrics::{
    InstrumentMetrics, InstrumentOutcome, InstrumentResult, SharpeCalculator,
};
use crate::domain::series::ReturnTable;
use crate::domain::shared::shift_months;

/// Failures that stop the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Price provider failed.
    #[error("Error downloading stock/index data: {0}")]
    PriceDownload(MarketDataError),

    /// Provider returned no rows at all.
    #[error(
        "No price data found for the given tickers and date range (up to {effective_end})."
    )]
    NoPriceData {
        /// End date used for the download.
        effective_end: NaiveDate,
    },

    /// Every row was empty.
    #[error("Price data became empty after dropping NaNs. Check your date range and tickers.")]
    PriceDataEmptyAfterCleaning,

    /// Fewer than two usable months.
    #[error(
        "Not enough data to calculate monthly returns (need at least 2 months of price data)."
    )]
    InsufficientPriceHistory,

    /// Risk-free provider failed.
    #[error("Error downloading or processing risk-free rate data: {0}")]
    RiskFreeDownload(MarketDataError),

    /// Risk-free series came back empty.
    #[error("No risk-free rate data found for {series}.")]
    NoRiskFreeData {
        /// Series identifier.
        series: String,
    },

    /// No return date had a prior risk-free observation.
    #[error("Could not align risk-free rate data with asset returns.")]
    RiskFreeAlignment,
}

/// Use case computing Sharpe ratios for a set of instruments.
pub struct AnalyzeSharpeUseCase<P, R>
where
    P: PriceHistoryPort,
    R: RiskFreeRatePort,
{
    prices: Arc<P>,
    rates: Arc<R>,
}

impl<P, R> AnalyzeSharpeUseCase<P, R>
where
    P: PriceHistoryPort,
    R: RiskFreeRatePort,
{
    /// Create a new AnalyzeSharpeUseCase.
    pub const fn new(prices: Arc<P>, rates: Arc<R>) -> Self {
        Self { prices, rates }
    }

    /// Execute the use case.
    pub async fn execute(&self, request: &AnalysisRequest) -> Result<SharpeReport, AnalysisError> {
        let effective_end = request.effective_end_date();

        tracing::info!(
            provider = self.prices.provider_name(),
            tickers = request.tickers.len(),
            start = %request.start_date,
            end = %effective_end,
            "Downloading monthly prices"
        );

        // 1. Prices
        let mut prices = self
            .prices
            .fetch_monthly_closes(&request.tickers, request.start_date, effective_end)
            .await
            .map_err(AnalysisError::PriceDownload)?;

        if prices.is_empty() {
            return Err(AnalysisError::NoPriceData { effective_end });
        }

        let dropped = prices.drop_all_missing_rows();
        if dropped > 0 {
            tracing::debug!(dropped, "Dropped empty price rows");
        }
        if prices.is_empty() {
            return Err(AnalysisError::PriceDataEmptyAfterCleaning);
        }

        // 2. Log returns
        let returns = ReturnTable::log_returns(&prices);
        let (Some(period_start), Some(period_end)) = (returns.first_date(), returns.last_date())
        else {
            return Err(AnalysisError::InsufficientPriceHistory);
        };
        tracing::info!(rows = returns.len(), %period_start, %period_end, "Computed log returns");

        // 3. Risk-free benchmark
        let (rf_start, rf_end) = risk_free_window(request.start_date, effective_end);
        let rates = self
            .rates
            .fetch_rate_series(&request.risk_free_series, rf_start, rf_end)
            .await
            .map_err(AnalysisError::RiskFreeDownload)?;

        if rates.is_empty() {
            return Err(AnalysisError::NoRiskFreeData {
                series: request.risk_free_series.clone(),
            });
        }

        let average_risk_free_rate = rates
            .mean_aligned(returns.dates())
            .ok_or(AnalysisError::RiskFreeAlignment)?;
        tracing::info!(
            series = %request.risk_free_series,
            average_rate = average_risk_free_rate,
            "Aligned risk-free rate"
        );

        // 4. Per-instrument metrics
        let calculator = SharpeCalculator::new(request.periods_per_year, average_risk_free_rate);
        let results = request
            .tickers
            .iter()
            .map(|symbol| {
                let outcome = match returns.column(symbol) {
                    Some(column) => {
                        let outcome = calculator.evaluate(&column);
                        if outcome
                            .metrics()
                            .is_some_and(InstrumentMetrics::has_zero_volatility)
                        {
                            tracing::warn!(%symbol, "Volatility is zero, Sharpe ratio undefined");
                        }
                        outcome
                    }
                    None => {
                        tracing::warn!(%symbol, "Ticker not found in downloaded data");
                        InstrumentOutcome::MissingFromData
                    }
                };
                InstrumentResult {
                    symbol: symbol.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(SharpeReport {
            requested_start: request.start_date,
            requested_end: request.end_date,
            effective_end,
            period_start,
            period_end,
            risk_free_series: request.risk_free_series.clone(),
            average_risk_free_rate,
            periods_per_year: request.periods_per_year,
            results,
            prices,
            returns,
        })
    }
}

/// Download window for the risk-free series: one month of padding on each side
/// so the first return month always has a prior observation to fill from.
#[must_use]
pub fn risk_free_window(start: NaiveDate, effective_end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (shift_months(start, -1), shift_months(effective_end, 1))
}
