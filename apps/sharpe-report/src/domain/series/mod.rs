//! Time series for the monthly analysis.
//!
//! - [`PriceTable`]: monthly closes on a shared date index
//! - [`ReturnTable`]: complete-case log returns
//! - [`RateSeries`]: risk-free rate with forward-fill alignment

mod price_table;
mod rate_series;
mod return_table;

pub use price_table::{PricePoint, PriceTable};
pub use rate_series::RateSeries;
pub use return_table::ReturnTable;
