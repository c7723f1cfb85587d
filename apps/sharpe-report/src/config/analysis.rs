//! Analysis parameters: instruments, date range and benchmark.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::MONTHS_PER_YEAR;
use crate::domain::shared::Symbol;

/// What to analyze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Tickers to evaluate, in report order.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,
    /// First month of the analysis (inclusive).
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    /// End of the analysis (exclusive), clipped to today at run time.
    #[serde(default = "default_end_date")]
    pub end_date: NaiveDate,
    /// FRED series used as the risk-free benchmark.
    #[serde(default = "default_risk_free_series")]
    pub risk_free_series: String,
    /// Return observations per year.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

impl AnalysisConfig {
    /// Tickers as normalized symbols.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.tickers.iter().map(|t| Symbol::new(t)).collect()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            risk_free_series: default_risk_free_series(),
            periods_per_year: default_periods_per_year(),
        }
    }
}

fn default_tickers() -> Vec<String> {
    vec!["AAPL".to_string(), "^GSPC".to_string()]
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default()
}

fn default_risk_free_series() -> String {
    "TB3MS".to_string()
}

const fn default_periods_per_year() -> u32 {
    MONTHS_PER_YEAR
}
