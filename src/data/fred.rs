//! FRED API integration for constant-maturity Treasury yields.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::YieldSource;
use crate::domain::{DateWindow, Maturity, SeriesMap, ShortEnd, YieldObservation};
use crate::error::DataError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const PROVIDER: &str = "FRED";

pub struct FredClient {
    client: Client,
    api_key: String,
    series: SeriesMap,
    short_end: ShortEnd,
}

impl FredClient {
    /// Build a client from `FRED_API_KEY` (environment or `.env`).
    pub fn from_env(series: SeriesMap, short_end: ShortEnd, timeout: Duration) -> Result<Self, DataError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| DataError::ProviderUnavailable {
                provider: PROVIDER.to_string(),
                reason: "missing FRED_API_KEY in environment (.env)".to_string(),
            })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::ProviderUnavailable {
                provider: PROVIDER.to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            series,
            short_end,
        })
    }

    fn fetch_series(&self, series_id: &str, window: &DateWindow) -> Result<Vec<(NaiveDate, f64)>, String> {
        let start = window.start.to_string();
        let end = window.end.to_string();
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("observation_start", start.as_str()),
                ("observation_end", end.as_str()),
            ])
            .send()
            .map_err(|e| format!("request for {series_id} failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("request for {series_id} failed with status {}", resp.status()));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| format!("failed to parse response for {series_id}: {e}"))?;

        parse_observations(body)
    }
}

impl YieldSource for FredClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn short_end(&self) -> ShortEnd {
        self.short_end
    }

    fn fetch(&self, maturity: Maturity, window: &DateWindow) -> Result<Vec<YieldObservation>, DataError> {
        let series_id = self.series.series_id(maturity);
        debug!(%maturity, series_id, "requesting FRED series");
        let obs = self
            .fetch_series(series_id, window)
            .map_err(|reason| DataError::data_unavailable(PROVIDER, maturity, reason))?;

        Ok(obs
            .into_iter()
            .map(|(date, value)| YieldObservation::new(date, maturity, value))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

// FRED yields are already in percent.
fn parse_observations(body: ObservationsResponse) -> Result<Vec<(NaiveDate, f64)>, String> {
    let mut out = Vec::with_capacity(body.observations.len());
    for obs in body.observations {
        let Some(value) = parse_value(&obs.value) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| format!("invalid FRED date '{}': {e}", obs.date))?;
        out.push((date, value));
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
