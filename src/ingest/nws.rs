/// NWS (api.weather.gov) latest-observation client
///
/// Retrieves the most recent decoded METAR for a station and turns it into
/// the `Observation` the classifier consumes. Only the fields the classifier
/// reads are modelled; everything in the payload is optional because the API
/// routinely returns nulls for sensors that did not report.
///
/// API Documentation: https://www.weather.gov/documentation/services-web-api
/// Latest observation: https://api.weather.gov/stations/{stationId}/observations/latest

use serde::Deserialize;

use crate::model::{CloudLayer, FetchError, Observation, HTTP_NOT_FOUND};

pub const NWS_BASE_URL: &str = "https://api.weather.gov";

// ============================================================================
// API Response Structures
// ============================================================================

/// GeoJSON feature wrapping a single observation
#[derive(Debug, Deserialize)]
pub struct NwsObservationResponse {
    #[serde(default)]
    pub properties: Option<NwsObservationProperties>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NwsObservationProperties {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub raw_message: Option<String>,
    #[serde(default)]
    pub visibility: Option<NwsQuantity>,
    #[serde(default)]
    pub cloud_layers: Option<Vec<NwsCloudLayer>>,
}

/// The value of a `{ "unitCode": "wmoUnit:m", "value": 16090 }` pair.
/// Visibility and cloud bases are always reported in meters.
#[derive(Debug, Default, Deserialize)]
pub struct NwsQuantity {
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NwsCloudLayer {
    #[serde(default)]
    pub base: Option<NwsQuantity>,
    #[serde(default)]
    pub amount: Option<String>,
}

// ============================================================================
// URL construction
// ============================================================================

/// Builds the latest-observation URL for one station.
///
/// The station ID is upper-cased; the API is case-sensitive and answers 404
/// for "kpia".
pub fn build_latest_url(base_url: &str, airport_id: &str) -> String {
    format!(
        "{}/stations/{}/observations/latest",
        base_url.trim_end_matches('/'),
        airport_id.trim().to_ascii_uppercase()
    )
}

// ============================================================================
// Parsing
// ============================================================================

/// Turns an HTTP status and body into an `Observation`.
///
/// A 404 is not an error: it yields an empty observation carrying the status,
/// which the classifier maps to UNDF. Any other non-2xx status is an error.
pub fn parse_observation(airport_id: &str, status: u16, body: &str) -> Result<Observation, FetchError> {
    if status == HTTP_NOT_FOUND {
        return Ok(Observation {
            airport_id: airport_id.to_string(),
            http_status: status,
            ..Default::default()
        });
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Http(status));
    }

    if body.trim().is_empty() {
        return Err(FetchError::NoData(airport_id.to_string()));
    }

    let response: NwsObservationResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(into_observation(airport_id, status, response.properties))
}

fn into_observation(airport_id: &str, status: u16, props: Option<NwsObservationProperties>) -> Observation {
    let props = props.unwrap_or_default();
    let cloud_layers = props
        .cloud_layers
        .unwrap_or_default()
        .into_iter()
        .map(|layer| CloudLayer::new(
            layer.amount.as_deref().unwrap_or(""),
            layer.base.and_then(|b| b.value),
        ))
        .collect();

    Observation {
        airport_id: airport_id.to_string(),
        http_status: status,
        visibility_meters: props.visibility.and_then(|v| v.value),
        cloud_layers,
        raw_message: props.raw_message,
        timestamp: props.timestamp,
    }
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the latest observation for a station
///
/// # Parameters
/// - `client`: HTTP client (timeouts are configured on the client)
/// - `base_url`: API root, normally `NWS_BASE_URL`
/// - `user_agent`: api.weather.gov rejects requests without one
/// - `airport_id`: ICAO identifier (e.g., "KPIA")
pub fn fetch_latest(
    client: &reqwest::blocking::Client,
    base_url: &str,
    user_agent: &str,
    airport_id: &str,
) -> Result<Observation, FetchError> {
    let url = build_latest_url(base_url, airport_id);

    let response = client
        .get(&url)
        .header("User-Agent", user_agent)
        .header("Accept", "application/geo+json")
        .send()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| FetchError::Request(e.to_string()))?;

    parse_observation(airport_id, status, &body)
}

// ============================================================================
// Tests
// ============================================================================
