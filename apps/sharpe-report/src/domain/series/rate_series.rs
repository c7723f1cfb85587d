//! Risk-free rate observations and their alignment to return dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::mean;

/// Annualized risk-free rate observations, stored as fractions (0.05 = 5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    series_id: String,
    observations: Vec<(NaiveDate, f64)>,
}

impl RateSeries {
    /// Build a series from fractional observations.
    ///
    /// Observations are sorted by date; on duplicate dates the last one wins.
    /// Non-finite values are discarded.
    #[must_use]
    pub fn new(series_id: impl Into<String>, observations: Vec<(NaiveDate, f64)>) -> Self {
        let mut observations: Vec<_> = observations
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .collect();
        // Stable sort keeps input order among equal dates, so the last
        // duplicate is the one retained below.
        observations.sort_by_key(|(date, _)| *date);

        let mut deduped: Vec<(NaiveDate, f64)> = Vec::with_capacity(observations.len());
        for (date, value) in observations {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = value,
                _ => deduped.push((date, value)),
            }
        }

        Self {
            series_id: series_id.into(),
            observations: deduped,
        }
    }

    /// Build a series from observations quoted in percent (5.25 = 5.25%).
    #[must_use]
    pub fn from_percent(series_id: impl Into<String>, observations: Vec<(NaiveDate, f64)>) -> Self {
        Self::new(
            series_id,
            observations
                .into_iter()
                .map(|(date, pct)| (date, pct / 100.0))
                .collect(),
        )
    }

    /// Series identifier (e.g. `TB3MS`).
    #[must_use]
    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    /// Observations in ascending date order.
    #[must_use]
    pub fn observations(&self) -> &[(NaiveDate, f64)] {
        &self.observations
    }

    /// True when the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Reindex onto `dates` using the latest observation at or before each date.
    ///
    /// Dates earlier than the first observation are dropped.
    #[must_use]
    pub fn align_forward_fill(&self, dates: &[NaiveDate]) -> Vec<(NaiveDate, f64)> {
        dates
            .iter()
            .filter_map(|date| {
                let idx = self.observations.partition_point(|(obs, _)| obs <= date);
                idx.checked_sub(1)
                    .map(|i| (*date, self.observations[i].1))
            })
            .collect()
    }

    /// Mean of the forward-filled rates over `dates`.
    ///
    /// `None` when no date could be aligned.
    #[must_use]
    pub fn mean_aligned(&self, dates: &[NaiveDate]) -> Option<f64> {
        let aligned: Vec<f64> = self
            .align_forward_fill(dates)
            .into_iter()
            .map(|(_, rate)| rate)
            .collect();
        mean(&aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        let Some(date) = NaiveDate::from_ymd_opt(y, m, day) else {
            panic!("invalid test date");
        };
        date
    }

    #[test]
    fn percent_values_are_converted_to_fractions() {
        let series = RateSeries::from_percent("TB3MS", vec![(d(2023, 1, 1), 4.5)]);
        assert!((series.observations()[0].1 - 0.045).abs() < 1e-12);
        assert_eq!(series.series_id(), "TB3MS");
    }

    #[test]
    fn forward_fill_uses_latest_prior_observation() {
        let series = RateSeries::new(
            "TB3MS",
            vec![(d(2023, 1, 1), 0.04), (d(2023, 3, 1), 0.05)],
        );
        let aligned = series.align_forward_fill(&[
            d(2022, 12, 1),
            d(2023, 1, 1),
            d(2023, 2, 1),
            d(2023, 3, 1),
            d(2023, 4, 15),
        ]);

        assert_eq!(
            aligned,
            vec![
                (d(2023, 1, 1), 0.04),
                (d(2023, 2, 1), 0.04),
                (d(2023, 3, 1), 0.05),
                (d(2023, 4, 15), 0.05),
            ]
        );
    }

    #[test]
    fn mean_aligned_averages_filled_values() {
        let series = RateSeries::new(
            "TB3MS",
            vec![(d(2023, 1, 1), 0.02), (d(2023, 3, 1), 0.05)],
        );
        let Some(avg) = series.mean_aligned(&[d(2023, 2, 1), d(2023, 3, 1)]) else {
            panic!("alignment should produce values");
        };
        assert!((avg - 0.035).abs() < 1e-12);
    }

    #[test]
    fn mean_aligned_is_none_when_nothing_aligns() {
        let series = RateSeries::new("TB3MS", vec![(d(2024, 1, 1), 0.05)]);
        assert_eq!(series.mean_aligned(&[d(2023, 6, 1)]), None);
        assert_eq!(RateSeries::default().mean_aligned(&[d(2023, 6, 1)]), None);
    }

    #[test]
    fn duplicates_keep_last_and_nan_is_dropped() {
        let series = RateSeries::new(
            "X",
            vec![
                (d(2023, 2, 1), 0.02),
                (d(2023, 1, 1), f64::NAN),
                (d(2023, 2, 1), 0.03),
            ],
        );
        assert_eq!(series.observations(), &[(d(2023, 2, 1), 0.03)]);
    }
}
