//! Formatting utilities for performance metrics display.

use super::constants::HUNDRED;

/// Format a fraction as a percentage with 4 decimals (`0.123456` → `12.3456%`).
#[must_use]
pub fn format_pct4(value: f64) -> String {
    format!("{:.4}%", value * HUNDRED)
}

/// Format a fraction as a percentage with 2 decimals.
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value * HUNDRED)
}

/// Format an optional ratio with 4 decimals; undefined ratios print as `nan`.
#[must_use]
pub fn format_ratio4(value: Option<f64>) -> String {
    value.map_or_else(|| "nan".to_string(), |v| format!("{v:.4}"))
}
