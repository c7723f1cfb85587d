//! Plain-text report for stdout.

use crate::application::dto::SharpeReport;
use crate::domain::metrics::{InstrumentOutcome, format_pct4, format_ratio4};

/// Render the per-instrument blocks and the closing notes.
#[must_use]
pub fn render_console(report: &SharpeReport) -> String {
    let mut out = String::new();

    for result in &report.results {
        let ticker = &result.symbol;
        match &result.outcome {
            InstrumentOutcome::MissingFromData => {
                out.push_str(&format!(
                    "Warning: Ticker {ticker} not found in downloaded data columns.\n"
                ));
            }
            InstrumentOutcome::InsufficientData { .. } => {
                out.push_str(&format!(
                    "Not enough return data points for {ticker} to calculate Sharpe Ratio.\n"
                ));
            }
            InstrumentOutcome::Computed(m) => {
                if m.has_zero_volatility() {
                    out.push_str(&format!(
                        "Volatility for {ticker} is zero, Sharpe Ratio cannot be calculated\n"
                    ));
                }
                out.push_str(&format!("\nTicker: {ticker}\n"));
                out.push_str(&format!(
                    "  Average Monthly Return: {}\n",
                    format_pct4(m.avg_monthly_return)
                ));
                out.push_str(&format!(
                    "  Annualized Return: {}\n",
                    format_pct4(m.annualized_return)
                ));
                out.push_str(&format!(
                    "  Monthly Volatility (Std Dev): {}\n",
                    format_pct4(m.monthly_volatility)
                ));
                out.push_str(&format!(
                    "  Annualized Volatility: {}\n",
                    format_pct4(m.annualized_volatility)
                ));
                out.push_str(&format!(
                    "  Sharpe Ratio: {}\n",
                    format_ratio4(m.sharpe_ratio)
                ));
            }
        }
    }

    out.push_str(&format!(
        "\nNote: Calculations are based on monthly data from {} to {}.\n",
        report.period_start.format("%Y-%m-%d"),
        report.period_end.format("%Y-%m-%d")
    ));
    if report.is_truncated() {
        out.push_str(&format!(
            "The requested end date was {}, but data was only available up to {}.\n",
            report.requested_end.format("%Y-%m-%d"),
            report.effective_end.format("%Y-%m-%d")
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::metrics::{InstrumentMetrics, InstrumentResult};
    use crate::domain::series::{PriceTable, ReturnTable};
    use crate::domain::shared::Symbol;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, day) else {
            panic!("invalid test date");
        };
        date
    }

    fn report(results: Vec<InstrumentResult>, effective_end: NaiveDate) -> SharpeReport {
        SharpeReport {
            requested_start: d(2023, 1, 1),
            requested_end: d(2026, 1, 1),
            effective_end,
            period_start: d(2023, 2, 1),
            period_end: d(2025, 6, 1),
            risk_free_series: "TB3MS".to_string(),
            average_risk_free_rate: 0.045,
            periods_per_year: 12,
            results,
            prices: PriceTable::default(),
            returns: ReturnTable::default(),
        }
    }

    fn computed(sharpe_ratio: Option<f64>) -> InstrumentOutcome {
        InstrumentOutcome::Computed(InstrumentMetrics {
            observations: 29,
            avg_monthly_return: 0.012_345,
            annualized_return: 0.148_14,
            monthly_volatility: 0.061_234,
            annualized_volatility: 0.212_121,
            sharpe_ratio,
        })
    }

    #[test]
    fn renders_instrument_block() {
        let text = render_console(&report(
            vec![InstrumentResult {
                symbol: Symbol::new("AAPL"),
                outcome: computed(Some(0.456_7)),
            }],
            d(2025, 6, 15),
        ));

        let expected = "\nTicker: AAPL\n  Average Monthly Return: 1.2345%\n  Annualized Return: 14.8140%\n  Monthly Volatility (Std Dev): 6.1234%\n  Annualized Volatility: 21.2121%\n  Sharpe Ratio: 0.4567\n\nNote: Calculations are based on monthly data from 2023-02-01 to 2025-06-01.\nThe requested end date was 2026-01-01, but data was only available up to 2025-06-15.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn renders_warnings_and_skips_truncation_note() {
        let text = render_console(&report(
            vec![
                InstrumentResult {
                    symbol: Symbol::new("ZZZZ"),
                    outcome: InstrumentOutcome::MissingFromData,
                },
                InstrumentResult {
                    symbol: Symbol::new("NEW"),
                    outcome: InstrumentOutcome::InsufficientData { observations: 1 },
                },
                InstrumentResult {
                    symbol: Symbol::new("CASH"),
                    outcome: computed(None),
                },
            ],
            d(2026, 1, 1),
        ));

        assert!(text.starts_with("Warning: Ticker ZZZZ not found in downloaded data columns.\n"));
        assert!(text.contains("Not enough return data points for NEW to calculate Sharpe Ratio.\n"));
        assert!(text.contains(
            "Volatility for CASH is zero, Sharpe Ratio cannot be calculated\n\nTicker: CASH\n"
        ));
        assert!(text.contains("  Sharpe Ratio: nan\n"));
        assert!(!text.contains("The requested end date"));
    }
}
