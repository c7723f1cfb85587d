//! Core types for per-instrument risk/return metrics.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// Annualized risk/return statistics for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMetrics {
    /// Number of monthly returns used.
    pub observations: usize,
    /// Mean monthly log return.
    pub avg_monthly_return: f64,
    /// Mean monthly return × periods per year.
    pub annualized_return: f64,
    /// Sample standard deviation of monthly returns.
    pub monthly_volatility: f64,
    /// Monthly volatility × sqrt(periods per year).
    pub annualized_volatility: f64,
    /// Excess annual return per unit of annual volatility.
    /// `None` when volatility is zero.
    pub sharpe_ratio: Option<f64>,
}

impl InstrumentMetrics {
    /// True when the Sharpe ratio could not be computed because volatility is zero.
    #[must_use]
    pub const fn has_zero_volatility(&self) -> bool {
        self.sharpe_ratio.is_none()
    }
}

/// What happened when an instrument was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentOutcome {
    /// Metrics were computed (Sharpe may still be undefined).
    Computed(InstrumentMetrics),
    /// Fewer returns than needed for a volatility estimate.
    InsufficientData {
        /// Returns available.
        observations: usize,
    },
    /// The requested ticker has no column in the downloaded data.
    MissingFromData,
}

impl InstrumentOutcome {
    /// Metrics, if computed.
    #[must_use]
    pub const fn metrics(&self) -> Option<&InstrumentMetrics> {
        match self {
            Self::Computed(m) => Some(m),
            _ => None,
        }
    }

    /// Sharpe ratio, if defined.
    #[must_use]
    pub fn sharpe_ratio(&self) -> Option<f64> {
        self.metrics().and_then(|m| m.sharpe_ratio)
    }
}

/// Outcome for a single requested ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentResult {
    /// Requested symbol.
    pub symbol: Symbol,
    /// Evaluation outcome.
    #[serde(flatten)]
    pub outcome: InstrumentOutcome,
}
