//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated fetch window (`DateRange`)
//! - raw provider records (`Observation`)
//! - cleaned per-series tables (`SeriesTable`) and joined tables (`AlignedTable`)
//! - the per-run configuration (`ViewConfig`) and view outputs (`IndicatorView`)

pub mod types;

pub use types::*;
