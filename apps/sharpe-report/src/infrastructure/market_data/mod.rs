//! Price History Adapters
//!
//! HTTP implementations of `PriceHistoryPort`.

mod alpaca;
mod api_types;
mod yahoo;

pub use alpaca::AlpacaBarsAdapter;
pub use yahoo::YahooChartAdapter;
