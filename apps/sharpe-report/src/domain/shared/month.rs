//! Calendar-month helpers for monthly series.

use chrono::{Datelike, Months, NaiveDate};

/// First day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Shift `date` by `months` calendar months, clamping to the month end.
///
/// Returns `date` unchanged if the result falls outside chrono's range.
#[must_use]
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let magnitude = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    };
    shifted.unwrap_or(date)
}
