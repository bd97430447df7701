//! Static catalog mapping indicator names to FRED series identifiers.
//!
//! The catalog is fixed at compile time, read-only, and reentrant. Simple
//! indicators map to one identifier; composite indicators (yield curve,
//! breakeven) map to an ordered list of (tenor label, identifier) pairs whose
//! order fixes the column order of the joined table.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The eleven Treasury constant-maturity tenors, shortest first.
pub const YIELD_CURVE_TENORS: &[(&str, &str)] = &[
    ("1M", "DGS1MO"),
    ("3M", "DGS3MO"),
    ("6M", "DGS6MO"),
    ("1Y", "DGS1"),
    ("2Y", "DGS2"),
    ("3Y", "DGS3"),
    ("5Y", "DGS5"),
    ("7Y", "DGS7"),
    ("10Y", "DGS10"),
    ("20Y", "DGS20"),
    ("30Y", "DGS30"),
];

/// Breakeven inflation tenors. Labels follow the true tenor of the underlying
/// series (T5YIE is the 5-year breakeven, T10YIE the 10-year).
pub const BREAKEVEN_TENORS: &[(&str, &str)] = &[("5Y", "T5YIE"), ("10Y", "T10YIE")];

/// Operands of the breakeven spread (long minus short).
pub const BREAKEVEN_LONG: &str = "10Y";
pub const BREAKEVEN_SHORT: &str = "5Y";

/// A logical indicator from the fixed catalog domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Indicator {
    YieldCurve,
    FedFunds,
    RealGdp,
    Unemployment,
    Cpi,
    Breakeven,
}

/// What an indicator resolves to: one identifier, or an ordered set of
/// labeled identifiers for composite views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSet {
    Single(&'static str),
    Composite(&'static [(&'static str, &'static str)]),
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::YieldCurve,
        Indicator::FedFunds,
        Indicator::RealGdp,
        Indicator::Unemployment,
        Indicator::Cpi,
        Indicator::Breakeven,
    ];

    /// Human-readable name; also the name `resolve` accepts.
    pub fn display_name(self) -> &'static str {
        match self {
            Indicator::YieldCurve => "Yield Curve",
            Indicator::FedFunds => "Fed Funds Rate",
            Indicator::RealGdp => "Real GDP",
            Indicator::Unemployment => "Unemployment Rate",
            Indicator::Cpi => "CPI",
            Indicator::Breakeven => "Breakeven Inflation",
        }
    }

    /// Short slug accepted on the command line (`yield-curve`, `cpi`, ...).
    pub fn slug(self) -> &'static str {
        match self {
            Indicator::YieldCurve => "yield-curve",
            Indicator::FedFunds => "fed-funds",
            Indicator::RealGdp => "real-gdp",
            Indicator::Unemployment => "unemployment",
            Indicator::Cpi => "cpi",
            Indicator::Breakeven => "breakeven",
        }
    }

    /// Axis label for chart/table value columns.
    pub fn unit_label(self) -> &'static str {
        match self {
            Indicator::YieldCurve | Indicator::FedFunds | Indicator::Breakeven => "rate (%)",
            Indicator::RealGdp => "chained 2017 $bn",
            Indicator::Unemployment => "rate (%)",
            Indicator::Cpi => "index (1982-84=100)",
        }
    }

    /// The provider series backing this indicator.
    pub fn series(self) -> SeriesSet {
        match self {
            Indicator::YieldCurve => SeriesSet::Composite(YIELD_CURVE_TENORS),
            Indicator::FedFunds => SeriesSet::Single("FEDFUNDS"),
            Indicator::RealGdp => SeriesSet::Single("GDPC1"),
            Indicator::Unemployment => SeriesSet::Single("UNRATE"),
            Indicator::Cpi => SeriesSet::Single("CPIAUCSL"),
            Indicator::Breakeven => SeriesSet::Composite(BREAKEVEN_TENORS),
        }
    }

    pub fn is_composite(self) -> bool {
        matches!(self.series(), SeriesSet::Composite(_))
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Resolve an indicator name to its catalog entry.
///
/// Accepts the display name or the slug, case-insensitively. Fails with
/// `UnknownIndicator` for anything outside the domain; callers treat that as
/// a skippable warning, not a fatal error.
pub fn resolve(name: &str) -> Result<Indicator, AppError> {
    let needle = name.trim();
    for indicator in Indicator::ALL {
        if indicator.display_name().eq_ignore_ascii_case(needle)
            || indicator.slug().eq_ignore_ascii_case(needle)
        {
            return Ok(indicator);
        }
    }
    Err(AppError::UnknownIndicator(name.to_string()))
}

/// Display names of the full catalog, in presentation order.
pub fn all_names() -> Vec<String> {
    Indicator::ALL
        .iter()
        .map(|i| i.display_name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_display_name_and_slug() {
        assert_eq!(resolve("Unemployment Rate").unwrap(), Indicator::Unemployment);
        assert_eq!(resolve("yield-curve").unwrap(), Indicator::YieldCurve);
        assert_eq!(resolve("  cpi ").unwrap(), Indicator::Cpi);
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let err = resolve("Nonexistent Indicator").unwrap_err();
        assert!(matches!(err, AppError::UnknownIndicator(_)));
        assert!(err.to_string().contains("Nonexistent Indicator"));
    }

    #[test]
    fn yield_curve_tenors_are_ordered_short_to_long() {
        assert_eq!(YIELD_CURVE_TENORS.len(), 11);
        assert_eq!(YIELD_CURVE_TENORS.first().unwrap().1, "DGS1MO");
        assert_eq!(YIELD_CURVE_TENORS.last().unwrap().1, "DGS30");
    }

    #[test]
    fn breakeven_spread_operands_exist_in_tenor_set() {
        for label in [BREAKEVEN_LONG, BREAKEVEN_SHORT] {
            assert!(BREAKEVEN_TENORS.iter().any(|(l, _)| *l == label));
        }
    }

    #[test]
    fn simple_indicators_resolve_to_single_ids() {
        assert_eq!(Indicator::Unemployment.series(), SeriesSet::Single("UNRATE"));
        assert_eq!(Indicator::FedFunds.series(), SeriesSet::Single("FEDFUNDS"));
        assert_eq!(Indicator::RealGdp.series(), SeriesSet::Single("GDPC1"));
        assert_eq!(Indicator::Cpi.series(), SeriesSet::Single("CPIAUCSL"));
    }
}
