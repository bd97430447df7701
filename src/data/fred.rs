//! FRED API integration for the macro indicator series.
//!
//! One HTTP GET per series identifier per call, windowed by the requested
//! `DateRange`. The provider encodes "no data" as a non-numeric sentinel
//! (usually `"."`); those observations come back with an absent value rather
//! than an error, and the transformer decides what to do with them.

use chrono::NaiveDate;
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{DateRange, Observation};
use crate::error::{AppError, FetchCause};

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

pub struct FredClient {
    client: Client,
    api_key: String,
}

impl FredClient {
    /// Build a client from an explicit key (the key is configuration, never a
    /// literal in source).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::Config("Missing FRED_API_KEY in environment (.env).".to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Fetch raw observations for one series over the given window.
    pub fn fetch(&self, series_id: &str, range: &DateRange) -> Result<Vec<Observation>, AppError> {
        let start = range.start().to_string();
        let end = range.end().to_string();
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
            ])
            .send()
            .map_err(|e| AppError::Fetch {
                series_id: series_id.to_string(),
                cause: FetchCause::Transport(e.to_string()),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Fetch {
                series_id: series_id.to_string(),
                cause: FetchCause::Status(status.as_u16()),
            });
        }

        let body = resp.text().map_err(|e| AppError::Fetch {
            series_id: series_id.to_string(),
            cause: FetchCause::Transport(e.to_string()),
        })?;

        parse_observations(series_id, &body)
    }

    /// Fetch several labeled series in parallel, one request each.
    ///
    /// Results come back per label so a failed fetch never blocks or aborts
    /// its siblings; the caller aligns what succeeded and reports the rest.
    pub fn fetch_many(
        &self,
        series: &[(&'static str, &'static str)],
        range: &DateRange,
    ) -> Vec<(&'static str, Result<Vec<Observation>, AppError>)> {
        series
            .par_iter()
            .map(|&(label, series_id)| (label, self.fetch(series_id, range)))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// Parse a FRED response body into observations.
///
/// Kept free of the HTTP layer so it is testable on raw strings.
fn parse_observations(series_id: &str, body: &str) -> Result<Vec<Observation>, AppError> {
    let parsed: ObservationsResponse = serde_json::from_str(body).map_err(|e| AppError::Fetch {
        series_id: series_id.to_string(),
        cause: FetchCause::Malformed(e.to_string()),
    })?;

    let mut out = Vec::with_capacity(parsed.observations.len());
    for obs in parsed.observations {
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| AppError::Fetch {
            series_id: series_id.to_string(),
            cause: FetchCause::Malformed(format!("invalid date '{}': {e}", obs.date)),
        })?;
        out.push(Observation {
            date,
            value: parse_value(&obs.value),
        });
    }

    Ok(out)
}

/// Probe the provider's value string for a decimal number.
///
/// `"."` and empty strings are the provider's "no data" sentinels; non-finite
/// parses are treated the same way.
fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_handles_sentinels() {
        assert_eq!(parse_value("3.4"), Some(3.4));
        assert_eq!(parse_value(" 3.4 "), Some(3.4));
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn parse_observations_maps_sentinel_to_absent() {
        let body = r#"{
            "observations": [
                { "date": "2023-01-01", "value": "3.4" },
                { "date": "2023-02-01", "value": "." },
                { "date": "2023-03-01", "value": "3.6" }
            ]
        }"#;

        let obs = parse_observations("UNRATE", body).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].value, Some(3.4));
        assert_eq!(obs[1].value, None);
        assert_eq!(obs[2].value, Some(3.6));
    }

    #[test]
    fn parse_observations_accepts_empty_list() {
        let body = r#"{ "observations": [] }"#;
        let obs = parse_observations("UNRATE", body).unwrap();
        assert!(obs.is_empty());
    }

    #[test]
    fn parse_observations_rejects_unexpected_shape() {
        let err = parse_observations("UNRATE", r#"{ "error": "bad request" }"#).unwrap_err();
        match err {
            AppError::Fetch { series_id, cause } => {
                assert_eq!(series_id, "UNRATE");
                assert!(matches!(cause, FetchCause::Malformed(_)));
            }
            other => panic!("expected Fetch error, got {other:?}"),
        }
    }

    #[test]
    fn parse_observations_rejects_bad_dates() {
        let body = r#"{ "observations": [ { "date": "01/02/2023", "value": "1.0" } ] }"#;
        let err = parse_observations("DGS10", body).unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
    }
}
