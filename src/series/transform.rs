//! Cleaning of raw observations into a `SeriesTable`.
//!
//! Policy mirrors the provider's semantics: absent values are dropped rows
//! (never carried forward as gaps, never zero), dates are sorted ascending,
//! and the derived column is the percentage change between consecutive
//! retained values.

use crate::domain::{DuplicatePolicy, Observation, SeriesPoint, SeriesTable};
use crate::error::AppError;

/// Clean a fetched series.
///
/// - drops observations with absent values
/// - sorts by date ascending (stable, so input order breaks ties)
/// - collapses duplicate dates first-occurrence-wins; under
///   `DuplicatePolicy::Strict`, duplicates with *different* values fail with
///   `DuplicateDate`
/// - derives `pct_change[i] = (v[i] - v[i-1]) / v[i-1] * 100` for `i >= 1`,
///   absent on the first row and wherever the prior value is zero
pub fn clean(
    series_id: &str,
    observations: &[Observation],
    policy: DuplicatePolicy,
) -> Result<SeriesTable, AppError> {
    let mut present: Vec<(chrono::NaiveDate, f64)> = observations
        .iter()
        .filter_map(|obs| obs.value.map(|v| (obs.date, v)))
        .collect();

    // Stable sort keeps the first occurrence first among equal dates.
    present.sort_by_key(|&(date, _)| date);

    let mut retained: Vec<(chrono::NaiveDate, f64)> = Vec::with_capacity(present.len());
    for (date, value) in present {
        match retained.last() {
            Some(&(kept_date, kept_value)) if kept_date == date => {
                if policy == DuplicatePolicy::Strict && kept_value != value {
                    return Err(AppError::DuplicateDate {
                        series_id: series_id.to_string(),
                        date,
                    });
                }
                // First occurrence wins; later duplicates are discarded.
            }
            _ => retained.push((date, value)),
        }
    }

    let mut points = Vec::with_capacity(retained.len());
    for (i, &(date, value)) in retained.iter().enumerate() {
        let pct_change = if i == 0 {
            None
        } else {
            let prev = retained[i - 1].1;
            if prev == 0.0 {
                None
            } else {
                Some((value - prev) / prev * 100.0)
            }
        };
        points.push(SeriesPoint {
            date,
            value,
            pct_change,
        });
    }

    Ok(SeriesTable {
        series_id: series_id.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn obs(date: NaiveDate, value: Option<f64>) -> Observation {
        Observation { date, value }
    }

    #[test]
    fn drops_absent_values_and_derives_change() {
        // The UNRATE scenario: "." in February is dropped entirely, and the
        // March change is computed against January.
        let raw = vec![
            obs(d(2023, 1, 1), Some(3.4)),
            obs(d(2023, 2, 1), None),
            obs(d(2023, 3, 1), Some(3.6)),
        ];

        let table = clean("UNRATE", &raw, DuplicatePolicy::FirstWins).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points[0].date, d(2023, 1, 1));
        assert_eq!(table.points[0].pct_change, None);
        assert_eq!(table.points[1].date, d(2023, 3, 1));

        let pct = table.points[1].pct_change.unwrap();
        let expected = (3.6 - 3.4) / 3.4 * 100.0;
        assert!((pct - expected).abs() < 1e-9);
        assert!((pct - 5.88).abs() < 0.01);
    }

    #[test]
    fn sorts_unordered_observations() {
        let raw = vec![
            obs(d(2023, 3, 1), Some(3.0)),
            obs(d(2023, 1, 1), Some(1.0)),
            obs(d(2023, 2, 1), Some(2.0)),
        ];

        let table = clean("UNRATE", &raw, DuplicatePolicy::FirstWins).unwrap();
        let dates: Vec<_> = table.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d(2023, 1, 1), d(2023, 2, 1), d(2023, 3, 1)]);
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = clean("UNRATE", &[], DuplicatePolicy::FirstWins).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn all_absent_yields_empty_table() {
        let raw = vec![obs(d(2023, 1, 1), None), obs(d(2023, 2, 1), None)];
        let table = clean("UNRATE", &raw, DuplicatePolicy::FirstWins).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_dates_keep_first_occurrence() {
        let raw = vec![
            obs(d(2023, 1, 1), Some(1.0)),
            obs(d(2023, 1, 1), Some(9.0)),
            obs(d(2023, 2, 1), Some(2.0)),
        ];

        let table = clean("DGS10", &raw, DuplicatePolicy::FirstWins).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points[0].value, 1.0);
        // The derived change uses the kept value, not the discarded one.
        assert!((table.points[1].pct_change.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn strict_mode_rejects_conflicting_duplicates() {
        let raw = vec![
            obs(d(2023, 1, 1), Some(1.0)),
            obs(d(2023, 1, 1), Some(9.0)),
        ];

        let err = clean("DGS10", &raw, DuplicatePolicy::Strict).unwrap_err();
        match err {
            AppError::DuplicateDate { series_id, date } => {
                assert_eq!(series_id, "DGS10");
                assert_eq!(date, d(2023, 1, 1));
            }
            other => panic!("expected DuplicateDate, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_collapses_equal_duplicates() {
        let raw = vec![
            obs(d(2023, 1, 1), Some(1.0)),
            obs(d(2023, 1, 1), Some(1.0)),
        ];

        let table = clean("DGS10", &raw, DuplicatePolicy::Strict).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn zero_prior_value_yields_absent_change() {
        let raw = vec![
            obs(d(2023, 1, 1), Some(0.0)),
            obs(d(2023, 2, 1), Some(2.0)),
            obs(d(2023, 3, 1), Some(3.0)),
        ];

        let table = clean("X", &raw, DuplicatePolicy::FirstWins).unwrap();
        assert_eq!(table.points[1].pct_change, None);
        assert!((table.points[2].pct_change.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn pct_change_recomputes_exactly() {
        let raw = vec![
            obs(d(2023, 1, 1), Some(104.2)),
            obs(d(2023, 2, 1), Some(104.9)),
            obs(d(2023, 3, 1), Some(104.3)),
        ];

        let table = clean("CPIAUCSL", &raw, DuplicatePolicy::FirstWins).unwrap();
        for i in 1..table.len() {
            let prev = table.points[i - 1].value;
            let cur = table.points[i].value;
            let expected = (cur - prev) / prev * 100.0;
            assert!((table.points[i].pct_change.unwrap() - expected).abs() < 1e-12);
        }
    }
}
