// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Sharpe Report - Rust Core Library
//!
//! Batch computation of risk-adjusted returns for a handful of instruments:
//! monthly prices in, annualized return, volatility and Sharpe ratio out.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure calculations with no IO
//!   - `series`: Price table, log returns, risk-free alignment
//!   - `metrics`: Mean, sample volatility, annualization, Sharpe ratio
//!   - `shared`: Symbols and calendar-month helpers
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `PriceHistoryPort`, `RiskFreeRatePort`
//!   - `use_cases`: `AnalyzeSharpeUseCase`
//!   - `dto`: `AnalysisRequest`, `SharpeReport`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: Retrying HTTP client
//!   - `market_data`: Yahoo chart and Alpaca bars adapters
//!   - `rates`: FRED CSV adapter
//!   - `report`: Console, JSON and HTML dashboard writers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core calculations with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::metrics::{InstrumentMetrics, InstrumentOutcome, InstrumentResult, SharpeCalculator};
pub use domain::series::{PriceTable, RateSeries, ReturnTable};
pub use domain::shared::Symbol;

// Application re-exports
pub use application::dto::{AnalysisRequest, SharpeReport};
pub use application::ports::{MarketDataError, PriceHistoryPort, RiskFreeRatePort};
pub use application::use_cases::{AnalysisError, AnalyzeSharpeUseCase};

// Infrastructure re-exports
pub use infrastructure::http::{HttpClient, HttpError, HttpSettings};
pub use infrastructure::market_data::{AlpacaBarsAdapter, YahooChartAdapter};
pub use infrastructure::rates::FredCsvAdapter;
pub use infrastructure::report::{ReportError, render_console, write_artifacts};
