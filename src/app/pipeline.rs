//! Shared view pipeline used by both the `show` command and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve -> fetch -> clean -> align -> derive
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//!
//! Fault policy: everything is caught at the indicator-view boundary. A
//! failed or empty view becomes `ViewData::Empty` plus warnings; an unknown
//! indicator name becomes a run-level warning; neither aborts the pass.

use crate::catalog::{self, BREAKEVEN_LONG, BREAKEVEN_SHORT, Indicator, SeriesSet};
use crate::data::FredClient;
use crate::domain::{
    IndicatorView, Observation, SeriesTable, ViewConfig, ViewData,
};
use crate::error::AppError;
use crate::series::{align, clean, spread};

/// All computed views of a single run.
#[derive(Debug, Clone)]
pub struct ViewSet {
    pub views: Vec<IndicatorView>,
    /// Run-level warnings (e.g., skipped unknown indicator names).
    pub warnings: Vec<String>,
}

impl ViewSet {
    /// Warnings from the run and from every view, in presentation order.
    pub fn all_warnings(&self) -> Vec<String> {
        let mut out = self.warnings.clone();
        for view in &self.views {
            for w in &view.warnings {
                out.push(format!("{}: {w}", view.indicator));
            }
        }
        out
    }
}

/// Execute the full pipeline for every selected indicator.
///
/// The date range inside `config` is already validated; unknown indicator
/// names are skipped with a warning and the rest still render.
pub fn run_views(client: &FredClient, config: &ViewConfig) -> ViewSet {
    let mut views = Vec::with_capacity(config.indicators.len());
    let mut warnings = Vec::new();

    for name in &config.indicators {
        match catalog::resolve(name) {
            Ok(indicator) => views.push(build_view(client, indicator, config)),
            Err(err) => warnings.push(err.to_string()),
        }
    }

    ViewSet { views, warnings }
}

/// Build one indicator's view, converting every fault into view state.
pub fn build_view(client: &FredClient, indicator: Indicator, config: &ViewConfig) -> IndicatorView {
    match indicator.series() {
        SeriesSet::Single(series_id) => {
            let fetched = client.fetch(series_id, &config.range);
            simple_view(indicator, series_id, fetched, config)
        }
        SeriesSet::Composite(pairs) => {
            let fetched = client.fetch_many(pairs, &config.range);
            composite_view(indicator, fetched, config)
        }
    }
}

/// Assemble a simple (single-series) view from a fetch result.
fn simple_view(
    indicator: Indicator,
    series_id: &str,
    fetched: Result<Vec<Observation>, AppError>,
    config: &ViewConfig,
) -> IndicatorView {
    let mut warnings = Vec::new();

    let table = fetched
        .and_then(|obs| clean(series_id, &obs, config.duplicates))
        .unwrap_or_else(|err| {
            warnings.push(err.to_string());
            SeriesTable::empty(series_id)
        });

    let data = if table.is_empty() {
        ViewData::Empty
    } else {
        ViewData::Series(table)
    };

    IndicatorView {
        indicator,
        data,
        warnings,
    }
}

/// Assemble a composite view from per-series fetch results.
///
/// Partial success: series that failed to fetch or clean are reported and the
/// survivors are aligned. Empty cleaned series are left out of the join, as
/// they contribute no dates.
fn composite_view(
    indicator: Indicator,
    fetched: Vec<(&'static str, Result<Vec<Observation>, AppError>)>,
    config: &ViewConfig,
) -> IndicatorView {
    let mut warnings = Vec::new();
    let mut tables: Vec<(String, SeriesTable)> = Vec::with_capacity(fetched.len());

    for (label, result) in fetched {
        match result.and_then(|obs| clean(label, &obs, config.duplicates)) {
            Ok(table) if !table.is_empty() => tables.push((label.to_string(), table)),
            Ok(_) => {}
            Err(err) => warnings.push(err.to_string()),
        }
    }

    let aligned = align(&tables);
    if aligned.is_empty() {
        return IndicatorView {
            indicator,
            data: ViewData::Empty,
            warnings,
        };
    }

    let data = if indicator == Indicator::Breakeven {
        match spread(&aligned, BREAKEVEN_LONG, BREAKEVEN_SHORT) {
            Ok(diff) => ViewData::Breakeven {
                table: aligned,
                spread: diff,
            },
            Err(err) => {
                // The spread needs both tenors; render what we have.
                warnings.push(err.to_string());
                ViewData::Breakeven {
                    table: aligned,
                    spread: Vec::new(),
                }
            }
        }
    } else {
        ViewData::Curve(aligned)
    };

    IndicatorView {
        indicator,
        data,
        warnings,
    }
}
