//! Nominatim (OpenStreetMap) place-search client.

use super::{Coordinates, GeocodeService, LookupError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Identifying user agent, required by the Nominatim usage policy.
const USER_AGENT: &str = concat!("clima-bot/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn classify_error(status: StatusCode, body: &str) -> LookupError {
        let detail = format!("Geocoding service returned {status}: {body}");
        match status.as_u16() {
            401 | 403 => LookupError::auth(detail),
            _ => LookupError::upstream(detail),
        }
    }
}

#[async_trait]
impl GeocodeService for NominatimClient {
    async fn search(&self, place: &str) -> Result<Option<Coordinates>, LookupError> {
        tracing::debug!(place, "Requesting geocoding candidates");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| transport_error("Geocoding request", &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Geocoding response read", &e))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        parse_candidates(&body)
    }
}

fn transport_error(context: &str, err: &reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::network(format!("{context} timed out: {err}"))
    } else {
        LookupError::network(format!("{context} failed: {err}"))
    }
}

// ============================================================
// Response Parsing
// ============================================================

/// Nominatim serializes coordinates as JSON strings, not numbers.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn parse_candidates(body: &str) -> Result<Option<Coordinates>, LookupError> {
    let candidates: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| LookupError::decode(format!("Failed to parse geocoding response: {e}")))?;

    match candidates.into_iter().next() {
        Some(first) => {
            let lat = parse_degrees("lat", &first.lat)?;
            let lon = parse_degrees("lon", &first.lon)?;
            Ok(Some(Coordinates { lat, lon }))
        }
        None => Ok(None),
    }
}

fn parse_degrees(field: &str, value: &str) -> Result<f64, LookupError> {
    value.parse().map_err(|_| {
        LookupError::decode(format!("Geocoding candidate has malformed {field}: {value}"))
    })
}
