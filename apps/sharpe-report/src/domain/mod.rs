//! Domain Layer
//!
//! Pure calculation logic with no infrastructure dependencies.
//!
//! - [`shared`]: Symbols and calendar-month helpers
//! - [`series`]: Price tables, log returns, risk-free alignment
//! - [`metrics`]: Annualization and Sharpe ratio

pub mod metrics;
pub mod series;
pub mod shared;
