//! Wire types for the price history APIs.

use std::collections::HashMap;

use serde::Deserialize;

// ============================================
// Yahoo chart API
// ============================================

/// Top-level Yahoo chart response.
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    /// Chart envelope.
    pub chart: YahooChart,
}

/// Chart envelope: either results or an error.
#[derive(Debug, Deserialize)]
pub struct YahooChart {
    /// One result per requested symbol.
    pub result: Option<Vec<YahooChartResult>>,
    /// Error reported by the API.
    pub error: Option<YahooChartError>,
}

/// Chart-level error.
#[derive(Debug, Deserialize)]
pub struct YahooChartError {
    /// Error code, `Not Found` for unknown symbols.
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Price bars for one symbol.
#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    /// Bar timestamps (unix seconds). Absent when the range has no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    /// Indicator arrays aligned with `timestamp`.
    pub indicators: YahooIndicators,
}

/// Quote and adjusted-close arrays.
#[derive(Debug, Deserialize)]
pub struct YahooIndicators {
    /// OHLCV arrays.
    #[serde(default)]
    pub quote: Vec<YahooQuote>,
    /// Adjusted closes, when dividends/splits were requested.
    #[serde(default)]
    pub adjclose: Option<Vec<YahooAdjClose>>,
}

/// Close prices (other OHLCV fields are ignored).
#[derive(Debug, Deserialize)]
pub struct YahooQuote {
    /// Raw close, `null` for missing bars.
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

/// Adjusted close prices.
#[derive(Debug, Deserialize)]
pub struct YahooAdjClose {
    /// Adjusted close, `null` for missing bars.
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}

impl YahooChartResult {
    /// Close series to use: adjusted when present, raw otherwise.
    #[must_use]
    pub fn closes(&self) -> &[Option<f64>] {
        let adjusted = self
            .indicators
            .adjclose
            .as_ref()
            .and_then(|a| a.first())
            .map(|a| a.adjclose.as_slice())
            .filter(|a| !a.is_empty());
        let raw = self.indicators.quote.first().map(|q| q.close.as_slice());
        adjusted.or(raw).unwrap_or_default()
    }
}

// ============================================
// Alpaca bars API
// ============================================

/// Multi-symbol bars page.
#[derive(Debug, Deserialize)]
pub struct AlpacaBarsResponse {
    /// Bars keyed by symbol. `null` when no symbol has data.
    #[serde(default)]
    pub bars: Option<HashMap<String, Vec<AlpacaBar>>>,
    /// Token for the next page, if any.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One OHLCV bar.
#[derive(Debug, Deserialize)]
pub struct AlpacaBar {
    /// Bar start time (RFC 3339).
    pub t: String,
    /// Close price.
    pub c: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yahoo_prefers_adjusted_close() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1672549200, 1675227600],
                    "indicators": {
                        "quote": [{"close": [130.0, 145.0]}],
                        "adjclose": [{"adjclose": [128.5, null]}]
                    }
                }],
                "error": null
            }
        }"#;
        let Ok(response) = serde_json::from_str::<YahooChartResponse>(json) else {
            panic!("response should parse");
        };
        let Some(results) = response.chart.result else {
            panic!("expected results");
        };
        assert_eq!(results[0].closes(), &[Some(128.5), None]);
    }

    #[test]
    fn yahoo_falls_back_to_raw_close() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1672549200],
                    "indicators": {"quote": [{"close": [130.0]}]}
                }],
                "error": null
            }
        }"#;
        let Ok(response) = serde_json::from_str::<YahooChartResponse>(json) else {
            panic!("response should parse");
        };
        let Some(results) = response.chart.result else {
            panic!("expected results");
        };
        assert_eq!(results[0].closes(), &[Some(130.0)]);
    }

    #[test]
    fn yahoo_error_envelope() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let Ok(response) = serde_json::from_str::<YahooChartResponse>(json) else {
            panic!("response should parse");
        };
        let Some(error) = response.chart.error else {
            panic!("expected error");
        };
        assert_eq!(error.code, "Not Found");
    }

    #[test]
    fn alpaca_bars_page() {
        let json = r#"{
            "bars": {"AAPL": [{"t": "2023-01-01T05:00:00Z", "o": 1.0, "h": 1.0, "l": 1.0, "c": 144.29, "v": 10}]},
            "next_page_token": null
        }"#;
        let Ok(page) = serde_json::from_str::<AlpacaBarsResponse>(json) else {
            panic!("page should parse");
        };
        let Some(bars) = page.bars else {
            panic!("expected bars");
        };
        assert!((bars["AAPL"][0].c - 144.29).abs() < f64::EPSILON);
        assert!(page.next_page_token.is_none());
    }
}
