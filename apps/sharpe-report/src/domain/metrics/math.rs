//! Statistical math utilities for performance metric calculations.

use super::constants::MIN_OBSERVATIONS;

/// Calculate the arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Calculate the sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < MIN_OBSERVATIONS {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    let variance = variance_sum / (values.len() - 1) as f64;

    Some(variance.sqrt())
}

/// Scale a per-period mean return to an annual figure.
pub fn annualize_return(period_return: f64, periods_per_year: u32) -> f64 {
    period_return * f64::from(periods_per_year)
}

/// Scale a per-period volatility by the square root of time.
pub fn annualize_volatility(period_volatility: f64, periods_per_year: u32) -> f64 {
    period_volatility * f64::from(periods_per_year).sqrt()
}
