//! Outer join of several single-series tables onto one date axis.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{AlignedRow, AlignedTable, SeriesTable};

/// Merge labeled series tables into one wide table keyed by date.
///
/// The result covers the union of all input dates; a date missing from a
/// series leaves that cell absent (never zero-filled or interpolated).
/// Column order follows input order, but the date set is independent of it.
/// All-empty input produces an empty table, which callers render as "no data"
/// rather than a fault.
pub fn align(inputs: &[(String, SeriesTable)]) -> AlignedTable {
    let columns: Vec<String> = inputs.iter().map(|(label, _)| label.clone()).collect();
    let width = columns.len();

    // BTreeMap keeps the joined date axis sorted regardless of input order.
    let mut cells_by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for (col, (_, table)) in inputs.iter().enumerate() {
        for point in &table.points {
            let row = cells_by_date
                .entry(point.date)
                .or_insert_with(|| vec![None; width]);
            row[col] = Some(point.value);
        }
    }

    let rows = cells_by_date
        .into_iter()
        .map(|(date, cells)| AlignedRow { date, cells })
        .collect();

    AlignedTable { columns, rows }
}
