//! HTTP Adapter Integration Tests
//!
//! Exercises the Yahoo, Alpaca and FRED adapters against a local mock server:
//! - Wire formats and query parameters
//! - Unknown symbols and series
//! - Pagination
//! - Retry on transient failures

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]

use std::time::Duration;

use chrono::NaiveDate;
use sharpe_report::application::ports::{MarketDataError, PriceHistoryPort, RiskFreeRatePort};
use sharpe_report::config::{AlpacaConfig, FredConfig, YahooConfig};
use sharpe_report::domain::shared::Symbol;
use sharpe_report::infrastructure::http::{HttpClient, HttpSettings, RetrySettings};
use sharpe_report::infrastructure::market_data::{AlpacaBarsAdapter, YahooChartAdapter};
use sharpe_report::infrastructure::rates::FredCsvAdapter;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================
// Fixtures
// ============================================

fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {path}: {e}"))
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn http_client(max_attempts: u32) -> HttpClient {
    HttpClient::new(&HttpSettings {
        timeout: Duration::from_secs(5),
        user_agent: "sharpe-report-test".to_string(),
        retry: RetrySettings {
            max_attempts,
            initial_backoff: Duration::from_millis(10),
            max_backoff: Duration::from_millis(50),
            multiplier: 2.0,
            jitter_factor: 0.0,
        },
    })
    .expect("client builds")
}

fn yahoo(server: &MockServer, max_attempts: u32) -> YahooChartAdapter {
    YahooChartAdapter::new(
        http_client(max_attempts),
        &YahooConfig {
            base_url: server.uri(),
        },
    )
}

fn alpaca(server: &MockServer) -> AlpacaBarsAdapter {
    AlpacaBarsAdapter::new(
        http_client(3),
        &AlpacaConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            data_url: server.uri(),
            feed: "iex".to_string(),
        },
    )
    .expect("credentials present")
}

fn fred(server: &MockServer) -> FredCsvAdapter {
    FredCsvAdapter::new(
        http_client(3),
        &FredConfig {
            base_url: server.uri(),
        },
    )
}

// ============================================
// Yahoo
// ============================================

#[tokio::test]
async fn test_yahoo_monthly_adjusted_closes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .and(query_param("interval", "1mo"))
        .and(query_param("period1", "1672531200"))
        .and(query_param("period2", "1681516800"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("yahoo_aapl_monthly.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let table = yahoo(&server, 3)
        .fetch_monthly_closes(&[Symbol::new("AAPL")], d(2023, 1, 1), d(2023, 4, 15))
        .await
        .expect("download succeeds");

    assert_eq!(
        table.dates(),
        &[d(2023, 1, 1), d(2023, 2, 1), d(2023, 3, 1), d(2023, 4, 1)]
    );
    let column = table.column(&Symbol::new("AAPL")).expect("AAPL column");
    let closes: Vec<Option<f64>> = column.into_iter().map(|(_, close)| close).collect();
    assert_eq!(closes, vec![Some(142.41), Some(145.71), None, Some(167.93)]);
}

#[tokio::test]
async fn test_yahoo_unknown_symbol_is_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("yahoo_aapl_monthly.json")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/ZZZZ"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        ))
        .mount(&server)
        .await;

    let table = yahoo(&server, 3)
        .fetch_monthly_closes(
            &[Symbol::new("AAPL"), Symbol::new("ZZZZ")],
            d(2023, 1, 1),
            d(2023, 4, 15),
        )
        .await
        .expect("download succeeds");

    assert_eq!(table.symbols(), &[Symbol::new("AAPL")]);
}

#[tokio::test]
async fn test_yahoo_retries_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("yahoo_aapl_monthly.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let table = yahoo(&server, 3)
        .fetch_monthly_closes(&[Symbol::new("AAPL")], d(2023, 1, 1), d(2023, 4, 15))
        .await
        .expect("second attempt succeeds");

    assert_eq!(table.len(), 4);
}

#[tokio::test]
async fn test_yahoo_gives_up_after_max_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let err = yahoo(&server, 2)
        .fetch_monthly_closes(&[Symbol::new("AAPL")], d(2023, 1, 1), d(2023, 4, 15))
        .await
        .expect_err("should give up");

    assert!(matches!(err, MarketDataError::ConnectionError { .. }));
}

#[tokio::test]
async fn test_yahoo_rate_limit_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/AAPL"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let err = yahoo(&server, 2)
        .fetch_monthly_closes(&[Symbol::new("AAPL")], d(2023, 1, 1), d(2023, 4, 15))
        .await
        .expect_err("should be rate limited");

    assert_eq!(
        err,
        MarketDataError::RateLimited {
            retry_after_secs: 0
        }
    );
}

#[tokio::test]
async fn test_yahoo_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = yahoo(&server, 3)
        .fetch_monthly_closes(&[Symbol::new("AAPL")], d(2023, 1, 1), d(2023, 4, 15))
        .await
        .expect_err("should fail");

    assert_eq!(err, MarketDataError::AuthenticationFailed);
}

// ============================================
// Alpaca
// ============================================

#[tokio::test]
async fn test_alpaca_follows_page_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stocks/bars"))
        .and(query_param("page_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"bars":{"AAPL":[{"t":"2023-03-01T05:00:00Z","o":146.8,"h":165.0,"l":143.9,"c":164.9,"v":1520266600}],
                        "MSFT":[{"t":"2023-01-01T05:00:00Z","o":243.1,"h":251.0,"l":219.4,"c":247.8,"v":666168200}]},
                "next_page_token":null}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/stocks/bars"))
        .and(query_param_is_missing("page_token"))
        .and(query_param("symbols", "AAPL,MSFT"))
        .and(query_param("timeframe", "1Month"))
        .and(query_param("adjustment", "all"))
        .and(header("APCA-API-KEY-ID", "key"))
        .and(header("APCA-API-SECRET-KEY", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"bars":{"AAPL":[{"t":"2023-01-01T05:00:00Z","c":144.29},{"t":"2023-02-01T05:00:00Z","c":147.41}]},
                "next_page_token":"page-2"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let table = alpaca(&server)
        .fetch_monthly_closes(
            &[Symbol::new("AAPL"), Symbol::new("MSFT")],
            d(2023, 1, 1),
            d(2023, 4, 1),
        )
        .await
        .expect("download succeeds");

    assert_eq!(table.symbols(), &[Symbol::new("AAPL"), Symbol::new("MSFT")]);
    assert_eq!(table.dates(), &[d(2023, 1, 1), d(2023, 2, 1), d(2023, 3, 1)]);
    let msft = table.column(&Symbol::new("MSFT")).expect("MSFT column");
    assert_eq!(msft[0].1, Some(247.8));
    assert_eq!(msft[1].1, None);
}

#[tokio::test]
async fn test_alpaca_skips_index_symbols_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let table = alpaca(&server)
        .fetch_monthly_closes(&[Symbol::new("^GSPC")], d(2023, 1, 1), d(2023, 4, 1))
        .await
        .expect("nothing to download");

    assert!(table.is_empty());
}

#[test]
fn test_alpaca_requires_credentials() {
    let err = AlpacaBarsAdapter::new(http_client(1), &AlpacaConfig::default())
        .expect_err("missing credentials");
    assert_eq!(err, MarketDataError::AuthenticationFailed);
}

// ============================================
// FRED
// ============================================

#[tokio::test]
async fn test_fred_csv_filtered_to_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/fredgraph.csv"))
        .and(query_param("id", "TB3MS"))
        .and(query_param("cosd", "2022-12-01"))
        .and(query_param("coed", "2023-04-15"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("fred_tb3ms.csv")))
        .expect(1)
        .mount(&server)
        .await;

    let series = fred(&server)
        .fetch_rate_series("TB3MS", d(2022, 12, 1), d(2023, 4, 15))
        .await
        .expect("download succeeds");

    assert_eq!(series.series_id(), "TB3MS");
    let dates: Vec<NaiveDate> = series.observations().iter().map(|(d, _)| *d).collect();
    assert_eq!(
        dates,
        vec![d(2022, 12, 1), d(2023, 1, 1), d(2023, 2, 1), d(2023, 3, 1)]
    );
    let expected = [0.0425, 0.0454, 0.0465, 0.0469];
    for ((_, rate), want) in series.observations().iter().zip(expected) {
        assert!((rate - want).abs() < 1e-12, "{rate} != {want}");
    }
}

#[tokio::test]
async fn test_fred_unknown_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/fredgraph.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fred(&server)
        .fetch_rate_series("NOPE", d(2022, 12, 1), d(2023, 4, 15))
        .await
        .expect_err("should fail");

    assert_eq!(
        err,
        MarketDataError::SeriesNotFound {
            series: "NOPE".to_string()
        }
    );
}

#[tokio::test]
async fn test_fred_html_error_page_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/fredgraph.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>\n"))
        .mount(&server)
        .await;

    let err = fred(&server)
        .fetch_rate_series("TB3MS", d(2022, 12, 1), d(2023, 4, 15))
        .await
        .expect_err("should fail");

    assert!(matches!(err, MarketDataError::InvalidResponse { .. }));
}
