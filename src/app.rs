//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the view configuration (dates, indicator selection)
//! - runs the fetch/transform pipeline
//! - dispatches to the text report or the TUI

use clap::Parser;

use crate::catalog;
use crate::cli::{Command, ViewArgs};
use crate::data::FredClient;
use crate::domain::{DateRange, ViewConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `mdash` and `mdash --start 2023-01-01` to behave like
    // `mdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_show(args: ViewArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args)?;
    let client = FredClient::from_env()?;
    let set = pipeline::run_views(&client, &config);

    println!("{}", crate::report::format_views(&set, &config));
    Ok(())
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args)?;
    crate::tui::run(config)
}

/// Build the pipeline configuration from CLI flags plus defaults.
///
/// Defaults mirror the dashboard conventions: the trailing year through
/// today, and the full indicator catalog. An inverted range is rejected here,
/// before any fetch.
pub fn view_config_from_args(args: &ViewArgs) -> Result<ViewConfig, AppError> {
    let today = chrono::Local::now().date_naive();
    let end = args.end.unwrap_or(today);
    let range = match args.start {
        Some(start) => DateRange::new(start, end)?,
        None => DateRange::trailing_year(end),
    };

    let indicators = if args.indicators.is_empty() {
        catalog::all_names()
    } else {
        args.indicators.clone()
    };

    Ok(ViewConfig {
        range,
        indicators,
        duplicates: args.duplicates,
        max_rows: args.rows.max(1),
    })
}

/// Rewrite argv so `mdash` defaults to `mdash tui`.
///
/// Rules:
/// - `mdash`                        -> `mdash tui`
/// - `mdash --start 2023-01-01 ...` -> `mdash tui --start 2023-01-01 ...`
/// - `mdash --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "show" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
