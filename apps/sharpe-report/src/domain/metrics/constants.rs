//! Constants for monthly performance metric calculations.

/// Monthly observations per year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Minimum number of returns needed for a sample standard deviation.
pub const MIN_OBSERVATIONS: usize = 2;

/// Volatility at or below this is treated as zero.
pub const VOLATILITY_EPSILON: f64 = 1e-12;

pub const HUNDRED: f64 = 100.0;
