//! Data acquisition from the FRED observations API.

pub mod fred;

pub use fred::FredClient;
