//! Date-indexed table of closing prices, one column per symbol.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Symbol;

/// A single observation in a price column.
pub type PricePoint = (NaiveDate, f64);

/// Closing prices for several symbols on a shared, ascending date index.
///
/// Cells are `None` when a symbol has no observation for that date
/// (or the provider reported a non-finite price).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    symbols: Vec<Symbol>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    /// Build a table from per-symbol columns with an outer join on date.
    ///
    /// Column order follows the input order. If a column repeats a date,
    /// the last finite observation wins; a missing close never replaces a
    /// recorded one.
    #[must_use]
    pub fn from_columns(columns: Vec<(Symbol, Vec<PricePoint>)>) -> Self {
        let mut all_dates = BTreeSet::new();
        let mut symbols = Vec::with_capacity(columns.len());
        let mut lookups: Vec<BTreeMap<NaiveDate, f64>> = Vec::with_capacity(columns.len());

        for (symbol, points) in columns {
            if symbols.contains(&symbol) {
                continue;
            }
            let mut lookup = BTreeMap::new();
            for (date, price) in points {
                all_dates.insert(date);
                if price.is_finite() {
                    lookup.insert(date, price);
                }
            }
            symbols.push(symbol);
            lookups.push(lookup);
        }

        let dates: Vec<NaiveDate> = all_dates.into_iter().collect();
        let rows = dates
            .iter()
            .map(|date| lookups.iter().map(|l| l.get(date).copied()).collect())
            .collect();

        Self {
            symbols,
            dates,
            rows,
        }
    }

    /// Symbols in column order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Row dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Raw rows, aligned with [`Self::dates`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// A table is empty when it has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.symbols.is_empty()
    }

    /// Column for a symbol, including missing cells.
    #[must_use]
    pub fn column(&self, symbol: &Symbol) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let idx = self.symbols.iter().position(|s| s == symbol)?;
        Some(
            self.dates
                .iter()
                .zip(&self.rows)
                .map(|(date, row)| (*date, row[idx]))
                .collect(),
        )
    }

    /// Drop rows in which every cell is missing. Returns the number dropped.
    pub fn drop_all_missing_rows(&mut self) -> usize {
        let before = self.dates.len();
        let mut dates = Vec::with_capacity(before);
        let mut rows = Vec::with_capacity(before);

        for (date, row) in self.dates.drain(..).zip(self.rows.drain(..)) {
            if row.iter().any(Option::is_some) {
                dates.push(date);
                rows.push(row);
            }
        }

        self.dates = dates;
        self.rows = rows;
        before - self.dates.len()
    }
}
