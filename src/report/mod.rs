//! Text rendering of indicator views for the `show` command.

pub mod format;

pub use format::*;
