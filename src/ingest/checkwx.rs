/// CheckWX decoded-METAR response parsing
///
/// CheckWX computes the flight category server-side, so this path bypasses
/// the decode entirely. Its category vocabulary is the four flight-rules
/// values only; anything else (missing, "NONE", empty data array) reads as
/// "not reported" and the caller falls back to decoding the observation.
///
/// Library-only: the poller in `main.rs` does not call CheckWX, because the
/// endpoint needs an API key. Callers that hold one fetch the body themselves
/// and pass the parsed category to `classify::classify_with_reported`.
///
/// Endpoint: https://api.checkwx.com/metar/{icao}/decoded

use serde::Deserialize;

use crate::model::{FetchError, FlightRules};

#[derive(Debug, Deserialize)]
pub struct CheckWxResponse {
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub data: Vec<CheckWxMetar>,
}

#[derive(Debug, Deserialize)]
pub struct CheckWxMetar {
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(default)]
    pub flight_category: Option<String>,
}

/// Extracts the reported flight category from the first METAR in the body.
pub fn parse_reported_category(body: &str) -> Result<Option<FlightRules>, FetchError> {
    let response: CheckWxResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(response
        .data
        .first()
        .and_then(|metar| metar.flight_category.as_deref())
        .and_then(FlightRules::from_code))
}
