//! Meteomatics current-conditions client.

use super::{Coordinates, LookupError, WeatherService, WeatherSnapshot};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.meteomatics.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Full parameter list requested on every call. Only three feed the
/// snapshot today; the rest are kept for API-compatible future intents.
const PARAMETERS: &str = "t_2m:C,t_max_2m_24h:C,t_min_2m_24h:C,precip_1h:mm,precip_24h:mm,\
                          wind_speed_10m:ms,wind_dir_10m:d,wind_gusts_10m_1h:ms,wind_gusts_10m_24h:ms,\
                          msl_pressure:hPa,weather_symbol_1h:idx,weather_symbol_24h:idx,uv:idx,\
                          sunrise:sql,sunset:sql";

const PARAM_TEMPERATURE: &str = "t_2m:C";
const PARAM_WIND_SPEED: &str = "wind_speed_10m:ms";
const PARAM_PRECIP_1H: &str = "precip_1h:mm";

pub struct MeteomaticsClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl MeteomaticsClient {
    pub fn new(base_url: &str, username: String, password: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    fn classify_error(status: StatusCode, body: &str) -> LookupError {
        match status.as_u16() {
            401 | 403 => LookupError::auth(format!(
                "Weather service rejected credentials ({status}): {body}"
            )),
            _ => LookupError::upstream(format!("Weather service returned {status}: {body}")),
        }
    }
}

#[async_trait]
impl WeatherService for MeteomaticsClient {
    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, LookupError> {
        tracing::debug!(lat = coords.lat, lon = coords.lon, "Requesting current conditions");

        let url = format!(
            "{}/now/{}/{},{}/json",
            self.base_url, PARAMETERS, coords.lat, coords.lon
        );

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| transport_error("Weather request", &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error("Weather response read", &e))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        parse_snapshot(&body)
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

#[derive(Debug, Deserialize)]
struct MeteomaticsResponse {
    data: Vec<ParameterSeries>,
}

#[derive(Debug, Deserialize)]
struct ParameterSeries {
    parameter: String,
    coordinates: Vec<CoordinateSeries>,
}

#[derive(Debug, Deserialize)]
struct CoordinateSeries {
    dates: Vec<TimedValue>,
}

/// Values are numeric for most parameters but strings for the
/// sunrise/sunset ones, so they stay raw JSON until extraction.
#[derive(Debug, Deserialize)]
struct TimedValue {
    value: serde_json::Value,
}

fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, LookupError> {
    let response: MeteomaticsResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::decode(format!("Failed to parse weather response: {e}")))?;

    Ok(WeatherSnapshot {
        temperature_c: numeric_parameter(&response, PARAM_TEMPERATURE)?,
        wind_speed_ms: numeric_parameter(&response, PARAM_WIND_SPEED)?,
        precip_1h_mm: numeric_parameter(&response, PARAM_PRECIP_1H)?,
    })
}

/// Pick a parameter out of the response by name. Positional access would
/// break silently if the upstream reordered its series.
fn numeric_parameter(response: &MeteomaticsResponse, name: &str) -> Result<f64, LookupError> {
    let series = response
        .data
        .iter()
        .find(|series| series.parameter == name)
        .ok_or_else(|| LookupError::decode(format!("Weather response is missing {name}")))?;

    series
        .coordinates
        .first()
        .and_then(|coordinate| coordinate.dates.first())
        .and_then(|timed| timed.value.as_f64())
        .ok_or_else(|| LookupError::decode(format!("Weather response has no numeric value for {name}")))
}
