//! Cross-series derived metrics over an aligned table.

use chrono::NaiveDate;

use crate::domain::AlignedTable;
use crate::error::AppError;

/// Per-date difference `long - short` between two columns.
///
/// Dates where either operand is absent are skipped entirely; no NaN or
/// partial rows reach the output. A label missing from the table is a
/// `MissingColumn` fault, which is distinct from a label that is present but
/// has gaps.
pub fn spread(
    table: &AlignedTable,
    long_label: &str,
    short_label: &str,
) -> Result<Vec<(NaiveDate, f64)>, AppError> {
    let long = table
        .column_index(long_label)
        .ok_or_else(|| AppError::MissingColumn(long_label.to_string()))?;
    let short = table
        .column_index(short_label)
        .ok_or_else(|| AppError::MissingColumn(short_label.to_string()))?;

    let out = table
        .rows
        .iter()
        .filter_map(|row| match (row.cells[long], row.cells[short]) {
            (Some(l), Some(s)) => Some((row.date, l - s)),
            _ => None,
        })
        .collect();

    Ok(out)
}
