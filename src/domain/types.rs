//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the fetch, transform, and presentation layers
//! - rendered as text tables or charts without further conversion

use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::Indicator;
use crate::error::AppError;

/// A validated observation window.
///
/// Construction enforces `start <= end`; an inverted range is rejected before
/// any fetch is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The trailing year ending at `end` (the default window when the user
    /// supplies no dates).
    pub fn trailing_year(end: NaiveDate) -> Self {
        let start = end.checked_sub_days(Days::new(365)).unwrap_or(end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A raw provider record.
///
/// `value` is absent when the provider reported its "no data" sentinel; that
/// is a normal case, not a fault, and the transformer drops such rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// One cleaned row: value plus the derived change versus the previous row.
///
/// `pct_change` is absent on the first row and wherever the prior value was
/// zero (dividing by it would push infinities into charts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub pct_change: Option<f64>,
}

/// A cleaned single-series table, strictly increasing by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesTable {
    pub series_id: String,
    pub points: Vec<SeriesPoint>,
}

impl SeriesTable {
    pub fn empty(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// Min/max of the value column, if any rows exist.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for p in &self.points {
            bounds = Some(match bounds {
                None => (p.value, p.value),
                Some((lo, hi)) => (lo.min(p.value), hi.max(p.value)),
            });
        }
        bounds
    }
}

/// One row of an outer-joined table: a date plus one cell per column.
///
/// An absent cell means the series had no observation for that date; it is
/// never zero-filled or interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub date: NaiveDate,
    pub cells: Vec<Option<f64>>,
}

/// A date-indexed wide table with one column per sub-series.
///
/// Rows are ordered by date and cover the union of the input date sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedTable {
    pub columns: Vec<String>,
    pub rows: Vec<AlignedRow>,
}

impl AlignedTable {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// The present (date, value) pairs of one column, by index.
    pub fn column_points(&self, index: usize) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.cells.get(index).copied().flatten().map(|v| (row.date, v)))
            .collect()
    }
}

/// How to treat duplicate dates within one fetched series.
///
/// The provider is not supposed to return them, so first-occurrence-wins is
/// the default; strict mode turns differing-value duplicates into a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    FirstWins,
    Strict,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults). Indicator selections stay
/// as free-form names here so the catalog can reject unknown ones as
/// skippable warnings rather than hard CLI errors.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub range: DateRange,
    pub indicators: Vec<String>,
    pub duplicates: DuplicatePolicy,
    /// Maximum table rows printed per view in `show` output.
    pub max_rows: usize,
}

/// The chart-ready payload of one indicator view.
#[derive(Debug, Clone)]
pub enum ViewData {
    /// A simple indicator: one cleaned series with its derived change column.
    Series(SeriesTable),
    /// The yield curve: one column per tenor, outer-joined on date.
    Curve(AlignedTable),
    /// Breakeven rates plus the long-minus-short spread.
    Breakeven {
        table: AlignedTable,
        spread: Vec<(NaiveDate, f64)>,
    },
    /// Nothing to display (all fetches failed or returned no rows).
    Empty,
}

/// One indicator's rendered state: data plus any per-series warnings.
///
/// Faults are caught at this boundary; a view is never allowed to abort its
/// siblings or the overall rendering pass.
#[derive(Debug, Clone)]
pub struct IndicatorView {
    pub indicator: Indicator,
    pub data: ViewData,
    pub warnings: Vec<String>,
}

impl IndicatorView {
    pub fn has_data(&self) -> bool {
        !matches!(self.data, ViewData::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_range_rejects_inverted() {
        let err = DateRange::new(d(2024, 6, 1), d(2024, 1, 1));
        assert!(matches!(err, Err(AppError::InvalidDateRange { .. })));
    }

    #[test]
    fn date_range_accepts_single_day() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(!range.contains(d(2024, 1, 2)));
    }

    #[test]
    fn trailing_year_spans_365_days() {
        let range = DateRange::trailing_year(d(2024, 6, 1));
        assert_eq!(range.end(), d(2024, 6, 1));
        assert_eq!((range.end() - range.start()).num_days(), 365);
    }

    #[test]
    fn column_points_skip_absent_cells() {
        let table = AlignedTable {
            columns: vec!["5Y".to_string(), "10Y".to_string()],
            rows: vec![
                AlignedRow {
                    date: d(2024, 1, 1),
                    cells: vec![Some(1.1), Some(2.3)],
                },
                AlignedRow {
                    date: d(2024, 1, 2),
                    cells: vec![Some(1.2), None],
                },
            ],
        };
        assert_eq!(table.column_points(0).len(), 2);
        assert_eq!(table.column_points(1), vec![(d(2024, 1, 1), 2.3)]);
    }
}
