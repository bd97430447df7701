//! Formatted terminal output for indicator views.
//!
//! We keep formatting code in one place so:
//! - the fetch/transform code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::app::pipeline::ViewSet;
use crate::domain::{AlignedTable, IndicatorView, SeriesTable, ViewConfig, ViewData};

/// Format the full run: header, warnings, then one section per view.
pub fn format_views(set: &ViewSet, config: &ViewConfig) -> String {
    let mut out = String::new();

    out.push_str("=== mdash - U.S. Macro Indicators (FRED) ===\n");
    out.push_str(&format!("Range: {}\n", config.range));
    out.push_str(&format!("Views: {}\n", set.views.len()));

    let warnings = set.all_warnings();
    if !warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &warnings {
            out.push_str(&format!("! {w}\n"));
        }
    }

    for view in &set.views {
        out.push('\n');
        out.push_str(&format_view(view, config.max_rows));
    }

    out
}

/// Format one indicator section.
pub fn format_view(view: &IndicatorView, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "--- {} [{}] ---\n",
        view.indicator.display_name(),
        view.indicator.unit_label()
    ));

    match &view.data {
        ViewData::Series(table) => out.push_str(&format_series_table(table, max_rows)),
        ViewData::Curve(table) => out.push_str(&format_aligned_table(table, max_rows)),
        ViewData::Breakeven { table, spread } => {
            out.push_str(&format_aligned_table(table, max_rows));
            if spread.is_empty() {
                out.push_str("(spread unavailable)\n");
            } else {
                out.push_str("\nSpread (10Y - 5Y):\n");
                out.push_str(&format_spread(spread, max_rows));
            }
        }
        ViewData::Empty => out.push_str("No data available.\n"),
    }

    out
}

/// Format a single cleaned series as date / value / month-over-month change.
///
/// Shows the most recent `max_rows` rows; older rows are summarized.
pub fn format_series_table(table: &SeriesTable, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>12} {:>10}\n",
        "date", "value", "chg % m/m"
    ));

    let skipped = table.len().saturating_sub(max_rows);
    if skipped > 0 {
        out.push_str(&format!("  ... ({skipped} earlier rows)\n"));
    }

    for point in table.points.iter().skip(skipped) {
        let pct = point
            .pct_change
            .map(|p| format!("{p:>10.2}"))
            .unwrap_or_else(|| format!("{:>10}", "-"));
        // NaiveDate's Display ignores format padding, so pad the string.
        out.push_str(&format!(
            "{:<12} {:>12.2} {pct}\n",
            point.date.to_string(),
            point.value
        ));
    }

    out
}

/// Format an aligned wide table; absent cells render as `-`.
pub fn format_aligned_table(table: &AlignedTable, max_rows: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<12}", "date"));
    for label in &table.columns {
        out.push_str(&format!(" {label:>8}"));
    }
    out.push('\n');

    let skipped = table.rows.len().saturating_sub(max_rows);
    if skipped > 0 {
        out.push_str(&format!("  ... ({skipped} earlier rows)\n"));
    }

    for row in table.rows.iter().skip(skipped) {
        out.push_str(&format!("{:<12}", row.date.to_string()));
        for cell in &row.cells {
            match cell {
                Some(v) => out.push_str(&format!(" {v:>8.2}")),
                None => out.push_str(&format!(" {:>8}", "-")),
            }
        }
        out.push('\n');
    }

    out
}

/// Format a derived spread sequence.
pub fn format_spread(spread: &[(NaiveDate, f64)], max_rows: usize) -> String {
    let mut out = String::new();

    let skipped = spread.len().saturating_sub(max_rows);
    if skipped > 0 {
        out.push_str(&format!("  ... ({skipped} earlier rows)\n"));
    }

    for &(date, value) in spread.iter().skip(skipped) {
        out.push_str(&format!("{:<12} {value:>8.2}\n", date.to_string()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Indicator;
    use crate::domain::{AlignedRow, SeriesPoint};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn unrate_table() -> SeriesTable {
        SeriesTable {
            series_id: "UNRATE".to_string(),
            points: vec![
                SeriesPoint {
                    date: d(2023, 1, 1),
                    value: 3.4,
                    pct_change: None,
                },
                SeriesPoint {
                    date: d(2023, 3, 1),
                    value: 3.6,
                    pct_change: Some(5.88),
                },
            ],
        }
    }

    #[test]
    fn series_table_renders_absent_change_as_dash() {
        let out = format_series_table(&unrate_table(), 12);
        let first_row = out.lines().nth(1).unwrap();
        assert!(first_row.contains("2023-01-01"));
        assert!(first_row.trim_end().ends_with('-'));
        assert!(out.contains("5.88"));
    }

    #[test]
    fn series_table_truncates_to_most_recent_rows() {
        let out = format_series_table(&unrate_table(), 1);
        assert!(out.contains("(1 earlier rows)"));
        assert!(out.contains("2023-03-01"));
        assert!(!out.contains("2023-01-01"));
    }

    #[test]
    fn aligned_table_renders_absent_cells_as_dash() {
        let table = AlignedTable {
            columns: vec!["5Y".to_string(), "10Y".to_string()],
            rows: vec![AlignedRow {
                date: d(2023, 1, 1),
                cells: vec![Some(1.1), None],
            }],
        };

        let out = format_aligned_table(&table, 12);
        assert!(out.lines().next().unwrap().contains("10Y"));
        assert!(out.contains("1.10"));
        assert!(out.lines().nth(1).unwrap().trim_end().ends_with('-'));
    }

    #[test]
    fn empty_view_reports_no_data() {
        let view = IndicatorView {
            indicator: Indicator::Cpi,
            data: ViewData::Empty,
            warnings: Vec::new(),
        };
        let out = format_view(&view, 12);
        assert!(out.contains("CPI"));
        assert!(out.contains("No data available."));
    }

    #[test]
    fn breakeven_view_includes_spread_section() {
        let view = IndicatorView {
            indicator: Indicator::Breakeven,
            data: ViewData::Breakeven {
                table: AlignedTable {
                    columns: vec!["5Y".to_string(), "10Y".to_string()],
                    rows: vec![AlignedRow {
                        date: d(2023, 1, 1),
                        cells: vec![Some(1.1), Some(2.3)],
                    }],
                },
                spread: vec![(d(2023, 1, 1), 1.2)],
            },
            warnings: Vec::new(),
        };

        let out = format_view(&view, 12);
        assert!(out.contains("Spread (10Y - 5Y):"));
        assert!(out.contains("1.20"));
    }
}
