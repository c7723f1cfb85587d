//! Monthly log returns derived from a [`PriceTable`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price_table::PriceTable;
use crate::domain::shared::Symbol;

/// Complete-case table of log returns.
///
/// Every row has a value for every symbol: rows where any column could not
/// produce a return are removed when the table is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnTable {
    symbols: Vec<Symbol>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
}

impl ReturnTable {
    /// Compute `ln(p[t] / p[t-1])` for each column, where `t-1` is the
    /// previous row of the price table.
    ///
    /// A cell is missing when either price is missing or non-positive; the
    /// first row never has a predecessor. Rows containing any missing cell
    /// are dropped.
    #[must_use]
    pub fn log_returns(prices: &PriceTable) -> Self {
        let rows = prices.rows();
        let mut dates = Vec::new();
        let mut out = Vec::new();

        for (idx, window) in rows.windows(2).enumerate() {
            let (prev, curr) = (&window[0], &window[1]);
            let returns: Option<Vec<f64>> = prev
                .iter()
                .zip(curr)
                .map(|(p0, p1)| match (p0, p1) {
                    (Some(p0), Some(p1)) if *p0 > 0.0 && *p1 > 0.0 => {
                        let r = (p1 / p0).ln();
                        r.is_finite().then_some(r)
                    }
                    _ => None,
                })
                .collect();

            if let Some(returns) = returns {
                dates.push(prices.dates()[idx + 1]);
                out.push(returns);
            }
        }

        Self {
            symbols: prices.symbols().to_vec(),
            dates,
            rows: out,
        }
    }

    /// Symbols in column order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Return dates (the later month of each pair).
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of return rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True when no complete return row exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.symbols.is_empty()
    }

    /// Returns for a symbol in date order.
    #[must_use]
    pub fn column(&self, symbol: &Symbol) -> Option<Vec<f64>> {
        let idx = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// First return date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last return date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}
