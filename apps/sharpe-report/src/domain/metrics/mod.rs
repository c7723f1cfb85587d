//! Risk-adjusted return metrics for monthly series.
//!
//! Implements:
//! - Mean and sample standard deviation of periodic returns
//! - Annualization (×N for returns, ×√N for volatility)
//! - Sharpe ratio against an average annualized risk-free rate

mod calculator;
mod constants;
mod format;
mod math;
mod types;

pub use calculator::SharpeCalculator;
pub use constants::MONTHS_PER_YEAR;
pub use format::{format_pct, format_pct4, format_ratio4};
pub use math::{annualize_return, annualize_volatility, mean, std_dev};
pub use types::{InstrumentMetrics, InstrumentOutcome, InstrumentResult};
