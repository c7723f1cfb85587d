//! Alpaca Bars Adapter
//!
//! `PriceHistoryPort` backed by Alpaca's historical stock bars endpoint.
//! All symbols go out in one paginated request. Index symbols (`^GSPC`)
//! are not served by Alpaca and are left out of the table.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};

use super::api_types::{AlpacaBar, AlpacaBarsResponse};
use crate::application::ports::{MarketDataError, PriceHistoryPort};
use crate::config::AlpacaConfig;
use crate::domain::series::{PricePoint, PriceTable};
use crate::domain::shared::{Symbol, month_start};
use crate::infrastructure::http::HttpClient;

/// Maximum bars per page accepted by the API.
const PAGE_LIMIT: &str = "10000";

/// Alpaca historical bars adapter.
#[derive(Clone)]
pub struct AlpacaBarsAdapter {
    http: HttpClient,
    api_key: String,
    api_secret: String,
    data_url: String,
    feed: String,
}

impl std::fmt::Debug for AlpacaBarsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlpacaBarsAdapter")
            .field("data_url", &self.data_url)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl AlpacaBarsAdapter {
    /// Create a new adapter.
    ///
    /// # Errors
    ///
    /// Returns `MarketDataError::AuthenticationFailed` if credentials are missing.
    pub fn new(http: HttpClient, config: &AlpacaConfig) -> Result<Self, MarketDataError> {
        if !config.has_credentials() {
            return Err(MarketDataError::AuthenticationFailed);
        }

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            data_url: config.data_url.trim_end_matches('/').to_string(),
            feed: config.feed.clone(),
        })
    }

    /// Fetch every page of bars for `symbols`.
    async fn fetch_all_pages(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashMap<String, Vec<AlpacaBar>>, MarketDataError> {
        let url = format!("{}/v2/stocks/bars", self.data_url);
        let joined = symbols
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        let headers = [
            ("APCA-API-KEY-ID", self.api_key.as_str()),
            ("APCA-API-SECRET-KEY", self.api_secret.as_str()),
        ];

        let mut bars: HashMap<String, Vec<AlpacaBar>> = HashMap::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0_u32;

        loop {
            let mut query = vec![
                ("symbols", joined.as_str()),
                ("timeframe", "1Month"),
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("adjustment", "all"),
                ("feed", self.feed.as_str()),
                ("limit", PAGE_LIMIT),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("page_token", token));
            }

            let page: AlpacaBarsResponse = self
                .http
                .get_json(&url, &query, &headers)
                .await
                .map_err(MarketDataError::from)?;
            pages += 1;

            for (symbol, mut symbol_bars) in page.bars.unwrap_or_default() {
                bars.entry(symbol).or_default().append(&mut symbol_bars);
            }

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(pages, symbols = bars.len(), "Downloaded Alpaca bars");
        Ok(bars)
    }
}

#[async_trait]
impl PriceHistoryPort for AlpacaBarsAdapter {
    async fn fetch_monthly_closes(
        &self,
        symbols: &[Symbol],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceTable, MarketDataError> {
        let (indices, equities): (Vec<Symbol>, Vec<Symbol>) =
            symbols.iter().cloned().partition(Symbol::is_index);
        for symbol in &indices {
            tracing::warn!(%symbol, "Index symbols are not available from Alpaca, skipping");
        }
        if equities.is_empty() {
            return Ok(PriceTable::default());
        }

        let mut bars = self.fetch_all_pages(&equities, start, end).await?;

        let columns = equities
            .into_iter()
            .filter_map(|symbol| {
                let Some(symbol_bars) = bars.remove(symbol.as_str()) else {
                    tracing::warn!(%symbol, "Symbol not found at provider, skipping");
                    return None;
                };
                let points = monthly_points(&symbol_bars, start, end);
                Some((symbol, points))
            })
            .collect();

        Ok(PriceTable::from_columns(columns))
    }

    fn provider_name(&self) -> &'static str {
        "alpaca"
    }
}

/// Convert bars to month-start keyed closes inside `[start, end)`.
/// Bars with unparseable timestamps are skipped.
fn monthly_points(bars: &[AlpacaBar], start: NaiveDate, end: NaiveDate) -> Vec<PricePoint> {
    let start = month_start(start);
    bars.iter()
        .filter_map(|bar| {
            let date = DateTime::parse_from_rfc3339(&bar.t).ok()?.date_naive();
            (date >= start && date < end).then_some((month_start(date), bar.c))
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

    fn bar(t: &str, c: f64) -> AlpacaBar {
        AlpacaBar {
            t: t.to_string(),
            c,
        }
    }

    #[test]
    fn monthly_points_normalize_dates() {
        let bars = vec![
            bar("2023-01-01T05:00:00Z", 144.29),
            bar("2023-02-01T05:00:00Z", 147.41),
            bar("not-a-date", 1.0),
        ];

        let points = monthly_points(&bars, d(2023, 1, 1), d(2024, 1, 1));

        assert_eq!(
            points,
            vec![(d(2023, 1, 1), 144.29), (d(2023, 2, 1), 147.41)]
        );
    }

    #[test]
    fn monthly_points_excludes_end_month() {
        let bars = vec![
            bar("2023-12-01T05:00:00Z", 192.53),
            bar("2024-01-01T05:00:00Z", 184.40),
        ];

        let points = monthly_points(&bars, d(2023, 1, 1), d(2024, 1, 1));

        assert_eq!(points, vec![(d(2023, 12, 1), 192.53)]);
    }

    #[test]
    fn adapter_requires_credentials() {
        let Ok(http) = HttpClient::new(&crate::infrastructure::http::HttpSettings {
            timeout: std::time::Duration::from_secs(1),
            user_agent: "test".to_string(),
            retry: crate::infrastructure::http::RetrySettings::default(),
        }) else {
            panic!("client should build");
        };

        let result = AlpacaBarsAdapter::new(http, &AlpacaConfig::default());
        assert!(matches!(result, Err(MarketDataError::AuthenticationFailed)));
    }
}
