//! Series transformation: cleaning, alignment, and derived metrics.
//!
//! Everything here is pure and request-scoped: raw observations in, tables
//! out, no IO. The fetch layer stays in `data` and the presentation layers in
//! `report`/`tui` so these functions are trivially testable.

pub mod align;
pub mod spread;
pub mod transform;

pub use align::align;
pub use spread::spread;
pub use transform::clean;
