//! Yahoo Finance Chart Adapter
//!
//! `PriceHistoryPort` backed by the public Yahoo chart API. One request per
//! symbol; monthly bars are normalized to the first day of their month.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};

use super::api_types::{YahooChartResponse, YahooChartResult};
use crate::application::ports::{MarketDataError, PriceHistoryPort};
use crate::config::YahooConfig;
use crate::domain::series::{PricePoint, PriceTable};
use crate::domain::shared::{Symbol, month_start};
use crate::infrastructure::http::{HttpClient, HttpError};

/// Chart error code Yahoo uses for unknown symbols.
const NOT_FOUND_CODE: &str = "Not Found";

/// Yahoo chart adapter.
#[derive(Debug, Clone)]
pub struct YahooChartAdapter {
    http: HttpClient,
    base_url: String,
}

impl YahooChartAdapter {
    /// Create a new adapter.
    #[must_use]
    pub fn new(http: HttpClient, config: &YahooConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Download one symbol. `Ok(None)` means the symbol is unknown to Yahoo.
    async fn fetch_symbol(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<PricePoint>>, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol.as_str());
        let period1 = unix_midnight(start).to_string();
        let period2 = unix_midnight(end).to_string();
        let query = [
            ("period1", period1.as_str()),
            ("period2", period2.as_str()),
            ("interval", "1mo"),
            ("events", "div,split"),
        ];

        let response: YahooChartResponse = match self.http.get_json(&url, &query, &[]).await {
            Ok(response) => response,
            Err(HttpError::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = response.chart.error {
            if error.code == NOT_FOUND_CODE {
                return Ok(None);
            }
            return Err(MarketDataError::ApiError {
                message: format!("{}: {}", error.code, error.description),
            });
        }

        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(None);
        };

        Ok(Some(monthly_points(&result, start, end)))
    }
}

#[async_trait]
impl PriceHistoryPort for YahooChartAdapter {
    async fn fetch_monthly_closes(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceTable, MarketDataError> {
        let mut columns = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            match self.fetch_symbol(symbol, start, end).await? {
                Some(points) => {
                    tracing::debug!(%symbol, bars = points.len(), "Downloaded monthly bars");
                    columns.push((symbol.clone(), points));
                }
                None => {
                    tracing::warn!(%symbol, "Symbol not found at provider, skipping");
                }
            }
        }

        Ok(PriceTable::from_columns(columns))
    }

    fn provider_name(&self) -> &'static str {
        "yahoo"
    }
}

/// Seconds since the epoch at midnight UTC of `date`.
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp())
}

/// Pair timestamps with closes, keep bars inside `[start, end)` and key them
/// by month start. Null closes are kept as NaN so the date still appears.
fn monthly_points(result: &YahooChartResult, start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
    let start = month_start(start);
    result
        .timestamp
        .iter()
        .zip(result.closes())
        .filter_map(|(ts, close)| {
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            (date >= start && date < end).then(|| (month_start(date), close.unwrap_or(f64::NAN)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, day) else {
            panic!("invalid test date");
        };
        date
    }

    fn parse(json: &str) -> YahooChartResult {
        let Ok(response) = serde_json::from_str::<YahooChartResponse>(json) else {
            panic!("response should parse");
        };
        let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
            panic!("expected a result");
        };
        result
    }

    #[test]
    fn unix_midnight_is_utc() {
        assert_eq!(unix_midnight(d(2023, 1, 1)), 1_672_531_200);
    }

    #[test]
    fn monthly_points_normalize_and_filter() {
        // 2022-12-01 05:00, 2023-01-01 05:00, 2023-02-01 05:00, 2023-02-14 21:00 (partial bar)
        let result = parse(
            r#"{"chart":{"result":[{
                "timestamp":[1669870800,1672549200,1675227600,1676408400],
                "indicators":{"quote":[{"close":[1.0,2.0,null,4.0]}]}
            }],"error":null}}"#,
        );

        let points = monthly_points(&result, d(2023, 1, 1), d(2023, 3, 1));

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], (d(2023, 1, 1), 2.0));
        assert_eq!(points[1].0, d(2023, 2, 1));
        assert!(points[1].1.is_nan());
        assert_eq!(points[2], (d(2023, 2, 1), 4.0));
    }

    #[test]
    fn monthly_points_handles_empty_result() {
        let result = parse(r#"{"chart":{"result":[{"indicators":{"quote":[{}]}}],"error":null}}"#);
        assert!(monthly_points(&result, d(2023, 1, 1), d(2024, 1, 1)).is_empty());
    }
}
