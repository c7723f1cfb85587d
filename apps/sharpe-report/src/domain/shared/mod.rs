//! Shared Domain Types
//!
//! Value objects and calendar helpers shared across the series and metrics contexts.

mod month;
mod symbol;

pub use month::{month_start, shift_months};
pub use symbol::Symbol;
