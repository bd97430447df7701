//! Crate-wide error type.
//!
//! The pipeline distinguishes fault kinds because the view layer treats them
//! differently: an unknown indicator is a skippable warning, a fetch failure
//! is reported per series without aborting sibling fetches, and data-integrity
//! faults (duplicate dates, missing columns) blank out a single view. The
//! binary maps each kind to a stable exit code.

use chrono::NaiveDate;

/// Why a single series fetch failed.
#[derive(Debug, Clone)]
pub enum FetchCause {
    /// Provider answered with a non-success HTTP status.
    Status(u16),
    /// Transport-level failure (DNS, TLS, timeout, ...).
    Transport(String),
    /// Response arrived but the body was not the expected shape.
    Malformed(String),
}

#[derive(Debug, Clone)]
pub enum AppError {
    /// Start date after end date; rejected before any fetch is attempted.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Indicator name outside the catalog's fixed domain.
    UnknownIndicator(String),
    /// A single series request failed; carries enough to report which one.
    Fetch { series_id: String, cause: FetchCause },
    /// Two observations for the same date with different values (strict mode).
    DuplicateDate { series_id: String, date: NaiveDate },
    /// A spread operand is entirely absent from the aligned table.
    MissingColumn(String),
    /// Missing or unusable configuration (e.g., no API key in the environment).
    Config(String),
    /// Terminal/IO failure in the TUI front-end.
    Terminal(String),
}

impl AppError {
    /// Exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidDateRange { .. } | AppError::UnknownIndicator(_) => 2,
            AppError::Config(_) => 2,
            AppError::Terminal(_) => 3,
            AppError::Fetch { .. } => 4,
            AppError::DuplicateDate { .. } | AppError::MissingColumn(_) => 4,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: start {start} is after end {end}.")
            }
            AppError::UnknownIndicator(name) => {
                write!(f, "Unknown indicator '{name}'.")
            }
            AppError::Fetch { series_id, cause } => match cause {
                FetchCause::Status(code) => {
                    write!(f, "Fetch for series {series_id} failed with status {code}.")
                }
                FetchCause::Transport(msg) => {
                    write!(f, "Fetch for series {series_id} failed: {msg}")
                }
                FetchCause::Malformed(msg) => {
                    write!(f, "Unexpected response for series {series_id}: {msg}")
                }
            },
            AppError::DuplicateDate { series_id, date } => {
                write!(f, "Series {series_id} has conflicting observations for {date}.")
            }
            AppError::MissingColumn(label) => {
                write!(f, "Column '{label}' is missing from the aligned table.")
            }
            AppError::Config(msg) => write!(f, "{msg}"),
            AppError::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failed_series() {
        let err = AppError::Fetch {
            series_id: "UNRATE".to_string(),
            cause: FetchCause::Status(429),
        };
        let msg = err.to_string();
        assert!(msg.contains("UNRATE"));
        assert!(msg.contains("429"));
    }

    #[test]
    fn exit_codes_are_stable() {
        let bad_range = AppError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(bad_range.exit_code(), 2);
        assert_eq!(AppError::MissingColumn("10Y".to_string()).exit_code(), 4);
    }
}
