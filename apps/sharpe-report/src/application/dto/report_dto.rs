//! Request and report DTOs for the Sharpe analysis.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::{InstrumentResult, MONTHS_PER_YEAR};
use crate::domain::series::{PriceTable, ReturnTable};
use crate::domain::shared::Symbol;

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Instruments to evaluate, in report order.
    pub tickers: Vec<Symbol>,
    /// First month requested (inclusive).
    pub start_date: NaiveDate,
    /// Requested end date (exclusive).
    pub end_date: NaiveDate,
    /// Risk-free series identifier (e.g. `TB3MS`).
    pub risk_free_series: String,
    /// Annualization factor for returns.
    pub periods_per_year: u32,
    /// Current date, used to clip the end date.
    pub today: NaiveDate,
}

impl AnalysisRequest {
    /// Create a monthly request for `tickers`.
    #[must_use]
    pub fn monthly(
        tickers: Vec<Symbol>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        risk_free_series: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            tickers,
            start_date,
            end_date,
            risk_free_series: risk_free_series.into(),
            periods_per_year: MONTHS_PER_YEAR,
            today,
        }
    }

    /// The requested end date clipped to today.
    #[must_use]
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.min(self.today)
    }
}

/// Result of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharpeReport {
    /// First month requested.
    pub requested_start: NaiveDate,
    /// End date as requested.
    pub requested_end: NaiveDate,
    /// End date actually used for downloads.
    pub effective_end: NaiveDate,
    /// First return date in the data.
    pub period_start: NaiveDate,
    /// Last return date in the data.
    pub period_end: NaiveDate,
    /// Risk-free series identifier.
    pub risk_free_series: String,
    /// Mean annualized risk-free rate over the return dates.
    pub average_risk_free_rate: f64,
    /// Annualization factor used.
    pub periods_per_year: u32,
    /// One entry per requested ticker, in request order.
    pub results: Vec<InstrumentResult>,
    /// Cleaned monthly closes.
    #[serde(skip)]
    pub prices: PriceTable,
    /// Complete-case log returns.
    #[serde(skip)]
    pub returns: ReturnTable,
}

impl SharpeReport {
    /// True when the end date was clipped to today.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.effective_end < self.requested_end
    }

    /// Look up the result for a symbol.
    #[must_use]
    pub fn result(&self, symbol: &Symbol) -> Option<&InstrumentResult> {
        self.results.iter().find(|r| &r.symbol == symbol)
    }

    /// Serialize the summary (without the underlying tables) to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
