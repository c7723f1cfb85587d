//! Risk-Free Rate Adapters

mod fred;

pub use fred::{FredCsvAdapter, parse_observations};
