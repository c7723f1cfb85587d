//! FRED CSV Adapter
//!
//! `RiskFreeRatePort` backed by the FRED graph CSV download. Values are
//! published in percent and converted to fractions.

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::ReaderBuilder;

use crate::application::ports::{MarketDataError, RiskFreeRatePort};
use crate::config::FredConfig;
use crate::domain::series::RateSeries;
use crate::infrastructure::http::{HttpClient, HttpError};

/// Placeholder FRED uses for missing observations.
const MISSING_VALUE: &str = ".";

/// FRED CSV adapter.
#[derive(Debug, Clone)]
pub struct FredCsvAdapter {
    http: HttpClient,
    base_url: String,
}

impl FredCsvAdapter {
    /// Create a new adapter.
    #[must_use]
    pub fn new(http: HttpClient, config: &FredConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RiskFreeRatePort for FredCsvAdapter {
    async fn fetch_rate_series(
        &self,
        series_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketDataError> {
        let url = format!("{}/graph/fredgraph.csv", self.base_url);
        let cosd = start.format("%Y-%m-%d").to_string();
        let coed = end.format("%Y-%m-%d").to_string();
        let query = [
            ("id", series_id),
            ("cosd", cosd.as_str()),
            ("coed", coed.as_str()),
        ];

        let body = match self.http.get_text(&url, &query, &[]).await {
            Ok(body) => body,
            Err(HttpError::NotFound { .. } | HttpError::Api { status: 400, .. }) => {
                return Err(MarketDataError::SeriesNotFound {
                    series: series_id.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let observations = parse_observations(&body)?;
        tracing::debug!(
            series = series_id,
            observations = observations.len(),
            "Downloaded risk-free series"
        );

        let in_window = observations
            .into_iter()
            .filter(|(date, _)| *date >= start && *date <= end)
            .collect();
        Ok(RateSeries::from_percent(series_id, in_window))
    }
}

/// Parse `date,value` rows. The header is skipped and missing values are dropped.
///
/// # Errors
///
/// Returns `MarketDataError::InvalidResponse` for malformed CSV, bad dates or
/// bad numbers.
pub fn parse_observations(body: &str) -> Result<Vec<(NaiveDate, f64)>, MarketDataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers().map_err(invalid)?;
    if headers.len() < 2 {
        return Err(MarketDataError::InvalidResponse {
            message: "expected a date column and a value column".to_string(),
        });
    }

    let mut observations = Vec::new();
    for result in reader.records() {
        let record = result.map_err(invalid)?;
        let (Some(date), Some(value)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if value.is_empty() || value == MISSING_VALUE {
            continue;
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            MarketDataError::InvalidResponse {
                message: format!("bad date {date:?}: {e}"),
            }
        })?;
        let value = value
            .parse::<f64>()
            .map_err(|e| MarketDataError::InvalidResponse {
                message: format!("bad value {value:?}: {e}"),
            })?;
        observations.push((date, value));
    }

    Ok(observations)
}

fn invalid(err: csv::Error) -> MarketDataError {
    MarketDataError::InvalidResponse {
        message: err.to_string(),
    }
}
