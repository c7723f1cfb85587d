//! Sharpe Report Binary
//!
//! Downloads monthly prices and the risk-free benchmark, prints annualized
//! return, volatility and Sharpe ratio per instrument, and optionally writes
//! a JSON summary and an HTML dashboard.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sharpe-report
//! ```
//!
//! # Environment Variables
//!
//! - `SHARPE_CONFIG`: Path to the YAML config (default: `config.yaml` if present,
//!   otherwise built-in defaults)
//! - `SHARPE_PLOT`: `true` | `false`, overrides `report.plot`
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use sharpe_report::application::dto::{AnalysisRequest, SharpeReport};
use sharpe_report::application::ports::{PriceHistoryPort, RiskFreeRatePort};
use sharpe_report::application::use_cases::AnalyzeSharpeUseCase;
use sharpe_report::config::{Config, DEFAULT_CONFIG_PATH, PriceProvider, load_config};
use sharpe_report::infrastructure::http::{HttpClient, HttpSettings};
use sharpe_report::infrastructure::market_data::{AlpacaBarsAdapter, YahooChartAdapter};
use sharpe_report::infrastructure::rates::FredCsvAdapter;
use sharpe_report::infrastructure::report::{render_console, write_artifacts};
use sharpe_report::telemetry::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let mut config = resolve_config(
        std::env::var("SHARPE_CONFIG").ok().as_deref(),
        Path::new(DEFAULT_CONFIG_PATH),
    )?;
    apply_plot_override(&mut config, std::env::var("SHARPE_PLOT").ok().as_deref());

    init_tracing(&config.observability.logging)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize tracing")?;
    log_config(&config);

    let http = HttpClient::new(&HttpSettings::from(&config.providers.http))
        .context("Failed to build HTTP client")?;
    let rates = Arc::new(FredCsvAdapter::new(http.clone(), &config.providers.fred));

    let request = AnalysisRequest {
        tickers: config.analysis.symbols(),
        start_date: config.analysis.start_date,
        end_date: config.analysis.end_date,
        risk_free_series: config.analysis.risk_free_series.clone(),
        periods_per_year: config.analysis.periods_per_year,
        today: Local::now().date_naive(),
    };

    let report = match config.providers.prices {
        PriceProvider::Yahoo => {
            let prices = Arc::new(YahooChartAdapter::new(http, &config.providers.yahoo));
            analyze(prices, rates, &request).await?
        }
        PriceProvider::Alpaca => {
            let prices = Arc::new(AlpacaBarsAdapter::new(http, &config.providers.alpaca)?);
            analyze(prices, rates, &request).await?
        }
    };

    print!("{}", render_console(&report));

    write_artifacts(&report, &config.report)?;
    Ok(())
}

async fn analyze<P, R>(
    prices: Arc<P>,
    rates: Arc<R>,
    request: &AnalysisRequest,
) -> anyhow::Result<SharpeReport>
where
    P: PriceHistoryPort,
    R: RiskFreeRatePort,
{
    let use_case = AnalyzeSharpeUseCase::new(prices, rates);
    Ok(use_case.execute(request).await?)
}

/// Load the explicitly named config, else `default_path` if present, else the
/// built-in defaults. An explicit path that cannot be read is an error.
fn resolve_config(explicit: Option<&str>, default_path: &Path) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(load_config(Some(path))?);
    }
    if default_path.exists() {
        return Ok(load_config(default_path.to_str())?);
    }
    Ok(Config::default())
}

/// Apply a `SHARPE_PLOT` value to `report.plot`; unrecognized values are ignored.
fn apply_plot_override(config: &mut Config, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    match parse_flag(value) {
        Some(plot) => config.report.plot = plot,
        None => eprintln!("Ignoring SHARPE_PLOT={value:?}: expected true or false"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn log_config(config: &Config) {
    tracing::info!(
        tickers = ?config.analysis.tickers,
        start = %config.analysis.start_date,
        end = %config.analysis.end_date,
        risk_free_series = %config.analysis.risk_free_series,
        provider = config.providers.prices.as_str(),
        plot = config.report.plot,
        json = config.report.json,
        "Configuration loaded"
    );
}

/// Load `.env` from the current directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use test_case::test_case;

    use super::{apply_plot_override, parse_flag, resolve_config};
    use sharpe_report::config::{Config, PriceProvider};

    fn write_config(dir: &Path, name: &str, yaml: &str) -> String {
        let path = dir.join(name);
        if let Err(e) = std::fs::write(&path, yaml) {
            panic!("write {}: {e}", path.display());
        }
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn explicit_config_wins_over_default_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let explicit = write_config(dir.path(), "custom.yaml", "analysis:\n  tickers: [\"MSFT\"]\n");
        let default = write_config(dir.path(), "config.yaml", "analysis:\n  tickers: [\"SPY\"]\n");

        let config = match resolve_config(Some(&explicit), Path::new(&default)) {
            Ok(c) => c,
            Err(e) => panic!("explicit config should load: {e:#}"),
        };
        assert_eq!(config.analysis.tickers, vec!["MSFT"]);
    }

    #[test]
    fn default_file_used_when_present() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let default = write_config(dir.path(), "config.yaml", "report:\n  json: true\n");

        let config = match resolve_config(None, Path::new(&default)) {
            Ok(c) => c,
            Err(e) => panic!("default file should load: {e:#}"),
        };
        assert!(config.report.json);
    }

    #[test]
    fn builtin_defaults_when_no_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let missing = dir.path().join("config.yaml");

        let config = match resolve_config(None, &missing) {
            Ok(c) => c,
            Err(e) => panic!("defaults expected: {e:#}"),
        };
        assert_eq!(config.analysis.tickers, vec!["AAPL", "^GSPC"]);
        assert_eq!(config.providers.prices, PriceProvider::Yahoo);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let missing = dir.path().join("nope.yaml");
        let missing = missing.to_string_lossy();

        let Err(e) = resolve_config(Some(&missing), &dir.path().join("config.yaml")) else {
            panic!("unreadable explicit config should fail");
        };
        assert!(format!("{e:#}").starts_with("Failed to read config file"));
    }

    #[test_case(None, false ; "unset keeps config")]
    #[test_case(Some("true"), true ; "true enables")]
    #[test_case(Some("0"), false ; "zero disables")]
    #[test_case(Some("bogus"), false ; "unrecognized ignored")]
    fn plot_override_from_unset_config(value: Option<&str>, expected: bool) {
        let mut config = Config::default();
        apply_plot_override(&mut config, value);
        assert_eq!(config.report.plot, expected);
    }

    #[test]
    fn plot_override_can_disable() {
        let mut config = Config::default();
        config.report.plot = true;
        apply_plot_override(&mut config, Some("off"));
        assert!(!config.report.plot);
    }

    #[test_case("true", Some(true))]
    #[test_case(" On ", Some(true))]
    #[test_case("1", Some(true))]
    #[test_case("FALSE", Some(false))]
    #[test_case("no", Some(false))]
    #[test_case("maybe", None)]
    #[test_case("", None)]
    fn parses_plot_flag(input: &str, expected: Option<bool>) {
        assert_eq!(parse_flag(input), expected);
    }
}
