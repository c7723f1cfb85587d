//! Self-contained HTML dashboard with three SVG charts:
//! cumulative growth, Sharpe ratio per instrument, and volatility vs return.

use std::path::{Path, PathBuf};

use super::error::ReportError;
use super::svg::{
    GUIDE_COLOR, HEIGHT, PADDING, WIDTH, color, escape, extent, horizontal_guide, legend, polyline,
    scale_x, scale_y, svg_footer, svg_header, time_axis, x_positions, y_axis,
};
use crate::application::dto::SharpeReport;
use crate::domain::metrics::{format_pct, format_ratio4};

/// File name of the dashboard.
pub const DASHBOARD_FILE_NAME: &str = "sharpe_dashboard.html";

const BAR_WIDTH_RATIO: f64 = 0.6;
const POINT_RADIUS: f64 = 4.0;

/// Write the dashboard to `{dir}/sharpe_dashboard.html`.
///
/// # Errors
///
/// Returns `ReportError::Io` if the file cannot be written.
pub fn write_dashboard(report: &SharpeReport, dir: &Path) -> Result<PathBuf, ReportError> {
    let path = dir.join(DASHBOARD_FILE_NAME);
    std::fs::write(&path, render_dashboard(report)).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Render the full HTML page.
#[must_use]
pub fn render_dashboard(report: &SharpeReport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Sharpe Ratio Report</title>\n");
    html.push_str(
        "<style>body{font-family:Arial,sans-serif;margin:24px;color:#333}\
         .chart{max-width:720px;margin-bottom:32px}\
         .chart h2{font-size:16px;font-weight:normal}\
         .empty{color:#999}</style>\n",
    );
    html.push_str("</head>\n<body>\n<h1>Sharpe Ratio Report</h1>\n");
    html.push_str(&format!(
        "<p>Monthly data from {} to {}. Average risk-free rate ({}): {}.</p>\n",
        report.period_start.format("%Y-%m-%d"),
        report.period_end.format("%Y-%m-%d"),
        escape(&report.risk_free_series),
        format_pct(report.average_risk_free_rate),
    ));

    push_chart(&mut html, "Cumulative Growth of $1", growth_chart(report));
    push_chart(&mut html, "Sharpe Ratio", sharpe_chart(report));
    push_chart(
        &mut html,
        "Annualized Volatility vs Annualized Return",
        risk_return_chart(report),
    );

    html.push_str("</body>\n</html>\n");
    html
}

fn push_chart(html: &mut String, title: &str, svg: Option<String>) {
    html.push_str(&format!("<div class=\"chart\">\n<h2>{}</h2>\n", escape(title)));
    match svg {
        Some(svg) => html.push_str(&svg),
        None => html.push_str("<p class=\"empty\">No data to plot.</p>"),
    }
    html.push_str("\n</div>\n");
}

/// Growth of one unit from compounded log returns, one line per instrument.
fn growth_chart(report: &SharpeReport) -> Option<String> {
    let returns = &report.returns;
    let first = returns.first_date()?;

    // Anchor each line at 1.0 on the last price date before the first return.
    let base_date = report.prices.dates().iter().rev().find(|d| **d < first).copied();
    let mut dates: Vec<_> = base_date.into_iter().collect();
    dates.extend_from_slice(returns.dates());

    let series: Vec<(String, Vec<f64>)> = returns
        .symbols()
        .iter()
        .filter_map(|symbol| {
            let column = returns.column(symbol)?;
            let mut values = Vec::with_capacity(dates.len());
            if base_date.is_some() {
                values.push(1.0);
            }
            let mut cumulative = 0.0;
            for r in column {
                cumulative += r;
                values.push(cumulative.exp());
            }
            Some((symbol.to_string(), values))
        })
        .collect();
    if series.is_empty() {
        return None;
    }

    let range = extent(
        series
            .iter()
            .flat_map(|(_, v)| v.iter().copied())
            .chain(std::iter::once(1.0)),
        false,
    )?;
    let xs = x_positions(dates.len());

    let mut svg = svg_header();
    time_axis(&mut svg, &dates, &xs);
    y_axis(&mut svg, range, |v| format!("{v:.2}"));
    horizontal_guide(&mut svg, scale_y(1.0, range), GUIDE_COLOR, true, None);

    let mut entries = Vec::with_capacity(series.len());
    for (idx, (label, values)) in series.iter().enumerate() {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(values)
            .map(|(x, v)| (*x, scale_y(*v, range)))
            .collect();
        svg.push_str(&polyline(&points, color(idx)));
        entries.push((label.clone(), color(idx)));
    }
    legend(&mut svg, &entries);
    svg.push_str(svg_footer());
    Some(svg)
}

/// One bar per instrument with a defined Sharpe ratio.
fn sharpe_chart(report: &SharpeReport) -> Option<String> {
    let bars: Vec<(usize, String, f64)> = report
        .results
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| Some((idx, r.symbol.to_string(), r.outcome.sharpe_ratio()?)))
        .collect();
    if bars.is_empty() {
        return None;
    }

    let range = extent(bars.iter().map(|(_, _, v)| *v), true)?;
    let xs = x_positions(bars.len());
    let slot = if bars.len() > 1 {
        xs[1] - xs[0]
    } else {
        WIDTH / 4.0
    };
    let bar_width = slot * BAR_WIDTH_RATIO;
    let zero_y = scale_y(0.0, range);

    let mut svg = svg_header();
    y_axis(&mut svg, range, |v| format!("{v:.2}"));
    horizontal_guide(&mut svg, zero_y, "#000", false, None);

    for ((idx, label, value), x) in bars.iter().zip(&xs) {
        let y = scale_y(*value, range);
        let (top, height) = if y < zero_y {
            (y, zero_y - y)
        } else {
            (zero_y, y - zero_y)
        };
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{fill}" />"#,
            x = x - bar_width / 2.0,
            fill = color(*idx),
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = HEIGHT - PADDING + 14.0,
            label = escape(label),
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{value}</text>"#,
            y = top - 4.0,
            value = format_ratio4(Some(*value)),
        ));
    }
    svg.push_str(svg_footer());
    Some(svg)
}

/// Scatter of annualized volatility (x) against annualized return (y), with
/// the average risk-free rate as a dashed guide.
fn risk_return_chart(report: &SharpeReport) -> Option<String> {
    let points: Vec<(usize, String, f64, f64)> = report
        .results
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| {
            let m = r.outcome.metrics()?;
            Some((
                idx,
                r.symbol.to_string(),
                m.annualized_volatility,
                m.annualized_return,
            ))
        })
        .collect();
    if points.is_empty() {
        return None;
    }

    let x_range = extent(points.iter().map(|p| p.2), true)?;
    let y_range = extent(
        points
            .iter()
            .map(|p| p.3)
            .chain(std::iter::once(report.average_risk_free_rate)),
        true,
    )?;

    let mut svg = svg_header();
    y_axis(&mut svg, y_range, format_pct);
    horizontal_guide(
        &mut svg,
        scale_y(report.average_risk_free_rate, y_range),
        GUIDE_COLOR,
        true,
        Some(&format!(
            "Risk-free {}",
            format_pct(report.average_risk_free_rate)
        )),
    );
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
        x = WIDTH - PADDING,
        y = HEIGHT - PADDING + 14.0,
        label = format!("volatility up to {}", format_pct(x_range.1)),
    ));

    for (idx, label, vol, ret) in &points {
        let cx = scale_x(*vol, x_range);
        let cy = scale_y(*ret, y_range);
        svg.push_str(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{POINT_RADIUS}" fill="{fill}" />"#,
            fill = color(*idx),
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="start">{label}</text>"#,
            x = cx + POINT_RADIUS + 2.0,
            y = cy - POINT_RADIUS,
            label = escape(label),
        ));
    }
    svg.push_str(svg_footer());
    Some(svg)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::metrics::{InstrumentMetrics, InstrumentOutcome, InstrumentResult};
    use crate::domain::series::{PriceTable, ReturnTable};
    use crate::domain::shared::Symbol;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, day) else {
            panic!("invalid test date");
        };
        date
    }

    fn sample_report() -> SharpeReport {
        let prices = PriceTable::from_columns(vec![
            (
                Symbol::new("AAPL"),
                vec![
                    (d(2023, 1, 1), 100.0),
                    (d(2023, 2, 1), 110.0),
                    (d(2023, 3, 1), 105.0),
                ],
            ),
            (
                Symbol::new("^GSPC"),
                vec![
                    (d(2023, 1, 1), 4000.0),
                    (d(2023, 2, 1), 4100.0),
                    (d(2023, 3, 1), 4050.0),
                ],
            ),
        ]);
        let returns = ReturnTable::log_returns(&prices);
        let metrics = InstrumentMetrics {
            observations: 2,
            avg_monthly_return: 0.02,
            annualized_return: 0.24,
            monthly_volatility: 0.014,
            annualized_volatility: 0.049,
            sharpe_ratio: Some(4.49),
        };

        SharpeReport {
            requested_start: d(2023, 1, 1),
            requested_end: d(2023, 4, 1),
            effective_end: d(2023, 4, 1),
            period_start: d(2023, 2, 1),
            period_end: d(2023, 3, 1),
            risk_free_series: "TB3MS".to_string(),
            average_risk_free_rate: 0.02,
            periods_per_year: 12,
            results: vec![
                InstrumentResult {
                    symbol: Symbol::new("AAPL"),
                    outcome: InstrumentOutcome::Computed(metrics),
                },
                InstrumentResult {
                    symbol: Symbol::new("^GSPC"),
                    outcome: InstrumentOutcome::Computed(InstrumentMetrics {
                        sharpe_ratio: None,
                        ..metrics
                    }),
                },
                InstrumentResult {
                    symbol: Symbol::new("ZZZZ"),
                    outcome: InstrumentOutcome::MissingFromData,
                },
            ],
            prices,
            returns,
        }
    }

    #[test]
    fn dashboard_has_three_charts() {
        let html = render_dashboard(&sample_report());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<svg").count(), 3);
        assert!(html.contains("Cumulative Growth of $1"));
        assert!(html.contains("Risk-free 2.00%"));
        assert!(html.contains("TB3MS"));
    }

    #[test]
    fn growth_chart_draws_a_line_per_symbol() {
        let Some(svg) = growth_chart(&sample_report()) else {
            panic!("expected growth chart");
        };
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains("AAPL"));
        assert!(svg.contains("^GSPC"));
    }

    #[test]
    fn sharpe_chart_skips_undefined_ratios() {
        let Some(svg) = sharpe_chart(&sample_report()) else {
            panic!("expected sharpe chart");
        };
        assert_eq!(svg.matches("<rect").count(), 1);
        assert!(svg.contains("4.4900"));
        assert!(!svg.contains("ZZZZ"));
    }

    #[test]
    fn empty_report_renders_placeholders() {
        let mut report = sample_report();
        report.results.clear();
        report.returns = ReturnTable::default();

        let html = render_dashboard(&report);

        assert_eq!(html.matches("No data to plot.").count(), 3);
    }

    #[test]
    fn write_dashboard_creates_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let Ok(path) = write_dashboard(&sample_report(), dir.path()) else {
            panic!("dashboard should be written");
        };
        assert!(path.ends_with(DASHBOARD_FILE_NAME));
        assert!(path.exists());
    }
}
