//! Sharpe ratio calculator for monthly return series.

use super::constants::{MIN_OBSERVATIONS, VOLATILITY_EPSILON};
use super::math::{annualize_return, annualize_volatility, mean, std_dev};
use super::types::{InstrumentMetrics, InstrumentOutcome};

/// Computes annualized return, volatility and Sharpe ratio.
#[derive(Debug, Clone, Copy)]
pub struct SharpeCalculator {
    periods_per_year: u32,
    risk_free_rate: f64,
}

impl SharpeCalculator {
    /// Create a calculator.
    ///
    /// `risk_free_rate` is the average annualized rate as a fraction.
    #[must_use]
    pub const fn new(periods_per_year: u32, risk_free_rate: f64) -> Self {
        Self {
            periods_per_year,
            risk_free_rate,
        }
    }

    /// Evaluate one instrument's periodic returns.
    #[must_use]
    pub fn evaluate(&self, returns: &[f64]) -> InstrumentOutcome {
        if returns.len() < MIN_OBSERVATIONS {
            return InstrumentOutcome::InsufficientData {
                observations: returns.len(),
            };
        }

        let (Some(avg), Some(std)) = (mean(returns), std_dev(returns)) else {
            return InstrumentOutcome::InsufficientData {
                observations: returns.len(),
            };
        };

        let annualized_return = annualize_return(avg, self.periods_per_year);
        let annualized_volatility = annualize_volatility(std, self.periods_per_year);

        InstrumentOutcome::Computed(InstrumentMetrics {
            observations: returns.len(),
            avg_monthly_return: avg,
            annualized_return,
            monthly_volatility: std,
            annualized_volatility,
            sharpe_ratio: self.sharpe(annualized_return, annualized_volatility),
        })
    }

    /// Calculate Sharpe ratio.
    /// Sharpe = (Annualized Return - Risk Free Rate) / Annualized Volatility
    fn sharpe(&self, annualized_return: f64, annualized_volatility: f64) -> Option<f64> {
        if annualized_volatility.abs() <= VOLATILITY_EPSILON {
            return None;
        }
        Some((annualized_return - self.risk_free_rate) / annualized_volatility)
    }
}
