//! Infrastructure Layer
//!
//! Adapters for external systems:
//!
//! - **http**: Retrying HTTP client shared by the data adapters
//! - **market_data**: Yahoo chart and Alpaca bars price adapters
//! - **rates**: FRED risk-free rate adapter
//! - **report**: Console, JSON and HTML dashboard writers

pub mod http;
pub mod market_data;
pub mod rates;
pub mod report;
