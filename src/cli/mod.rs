//! Command-line parsing for the macro indicators dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::DuplicatePolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mdash", version, about = "U.S. Macro Indicators Dashboard (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the selected indicators and print them as text tables.
    Show(ViewArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying view pipeline as `mdash show`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(ViewArgs),
}

/// Common options for building views.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Observation start date (YYYY-MM-DD). Defaults to one year ago.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Observation end date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Indicator to display (repeatable; name or slug, e.g. "Unemployment
    /// Rate" or yield-curve). Defaults to the full catalog. Unknown names are
    /// skipped with a warning.
    #[arg(short = 'i', long = "indicator")]
    pub indicators: Vec<String>,

    /// How to treat duplicate dates within one series.
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::FirstWins)]
    pub duplicates: DuplicatePolicy,

    /// Maximum table rows printed per view (`show` only).
    #[arg(long, default_value_t = 12)]
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_range_and_indicators() {
        let cli = Cli::parse_from([
            "mdash",
            "show",
            "--start",
            "2023-01-01",
            "--end",
            "2023-03-01",
            "-i",
            "cpi",
            "-i",
            "Unemployment Rate",
        ]);

        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.start, NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(args.end, NaiveDate::from_ymd_opt(2023, 3, 1));
        assert_eq!(args.indicators, vec!["cpi", "Unemployment Rate"]);
        assert_eq!(args.duplicates, DuplicatePolicy::FirstWins);
    }

    #[test]
    fn strict_duplicates_flag_parses() {
        let cli = Cli::parse_from(["mdash", "show", "--duplicates", "strict"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.duplicates, DuplicatePolicy::Strict);
    }
}
