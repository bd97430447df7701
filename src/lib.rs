//! `macro-dash` library crate.
//!
//! The binary (`mdash`) is a thin wrapper around this library so that:
//!
//! - the fetch/transform pipeline is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod report;
pub mod series;
pub mod tui;
