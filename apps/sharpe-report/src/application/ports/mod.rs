//! Application Ports (Driven)
//!
//! Ports define how the analysis reaches external data providers.
//! Adapters live in the infrastructure layer.

mod price_history_port;
mod risk_free_rate_port;

pub use price_history_port::{MarketDataError, PriceHistoryPort};
pub use risk_free_rate_port::RiskFreeRatePort;
