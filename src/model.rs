/// Core data types for the flight category service.
///
/// This module defines the shared domain model imported by all other modules:
/// the observation handed to the classifier, the classification it returns,
/// and the ordered flight-rules scale the classifier degrades along.
/// It contains no I/O.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Unit conversion constants
// ---------------------------------------------------------------------------

/// Meters to feet. Used for both cloud bases and visibility.
pub const FEET_PER_METER: f64 = 3.28084;

pub const FEET_PER_STATUTE_MILE: f64 = 5280.0;

/// HTTP status returned by api.weather.gov for an unknown station.
pub const HTTP_NOT_FOUND: u16 = 404;

// ---------------------------------------------------------------------------
// Placeholder messages
// ---------------------------------------------------------------------------

/// Shown in place of the report when the airport ID is unknown.
pub const UNDEFINED_AIRPORT_MESSAGE: &str = "The Airport ID entered is Undefined. Please Check ID";

/// Shown in place of the report when the observation carries no METAR text.
pub const NO_REPORT_MESSAGE: &str = "No METAR Data Returned by FAA API. CLICK for Raw METAR";

// ---------------------------------------------------------------------------
// Category types
// ---------------------------------------------------------------------------

/// Flight rules in ascending order of severity.
///
/// The derived `Ord` is load-bearing: `Vfr < Mvfr < Ifr < Lifr`, so merging
/// two signals is just `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightRules {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
}

impl FlightRules {
    /// Returns the more restrictive of the two.
    pub fn worse(self, other: FlightRules) -> FlightRules {
        self.max(other)
    }

    /// Parses an upper-case category code ("VFR", "MVFR", "IFR", "LIFR").
    pub fn from_code(code: &str) -> Option<FlightRules> {
        match code.trim() {
            "VFR" => Some(FlightRules::Vfr),
            "MVFR" => Some(FlightRules::Mvfr),
            "IFR" => Some(FlightRules::Ifr),
            "LIFR" => Some(FlightRules::Lifr),
            _ => None,
        }
    }
}

/// The category shown on a badge. Exactly one per classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    /// Observation returned without report text.
    Nowx,
    /// Airport ID unknown to the weather API.
    Undf,
}

impl FlightCategory {
    pub const ALL: [FlightCategory; 6] = [
        FlightCategory::Vfr,
        FlightCategory::Mvfr,
        FlightCategory::Ifr,
        FlightCategory::Lifr,
        FlightCategory::Nowx,
        FlightCategory::Undf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Nowx => "NOWX",
            FlightCategory::Undf => "UNDF",
        }
    }
}

impl From<FlightRules> for FlightCategory {
    fn from(rules: FlightRules) -> Self {
        match rules {
            FlightRules::Vfr => FlightCategory::Vfr,
            FlightRules::Mvfr => FlightCategory::Mvfr,
            FlightRules::Ifr => FlightCategory::Ifr,
            FlightRules::Lifr => FlightCategory::Lifr,
        }
    }
}

impl std::fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// Sky cover codes as reported in METAR cloud groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkyCover {
    Skc,
    Clr,
    Cavok,
    Nsc,
    Ncd,
    Few,
    Sct,
    Bkn,
    Ovc,
    /// Obscured, reported with a vertical visibility.
    Ovx,
    /// Vertical visibility into an obscuration.
    Vv,
    Other(String),
}

impl SkyCover {
    /// Total: codes outside the vocabulary land in `Other`.
    pub fn parse(code: &str) -> SkyCover {
        match code.trim().to_ascii_uppercase().as_str() {
            "SKC" => SkyCover::Skc,
            "CLR" => SkyCover::Clr,
            "CAVOK" => SkyCover::Cavok,
            "NSC" => SkyCover::Nsc,
            "NCD" => SkyCover::Ncd,
            "FEW" => SkyCover::Few,
            "SCT" => SkyCover::Sct,
            "BKN" => SkyCover::Bkn,
            "OVC" => SkyCover::Ovc,
            "OVX" => SkyCover::Ovx,
            "VV" => SkyCover::Vv,
            _ => SkyCover::Other(code.trim().to_string()),
        }
    }

    /// Broken, overcast and obscured layers define a ceiling.
    pub fn is_ceiling_forming(&self) -> bool {
        matches!(self, SkyCover::Bkn | SkyCover::Ovc | SkyCover::Ovx | SkyCover::Vv)
    }
}

/// One cloud group from the observation, in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudLayer {
    pub amount: SkyCover,
    pub base_meters: Option<f64>,
}

impl CloudLayer {
    pub fn new(amount: &str, base_meters: Option<f64>) -> Self {
        Self {
            amount: SkyCover::parse(amount),
            base_meters,
        }
    }
}

/// Parsed latest observation for one airport, as handed to the classifier.
///
/// Built once per fetch by `ingest::nws::parse_observation`. An observation
/// for an unknown station carries `http_status == 404` and no data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    pub airport_id: String,
    pub http_status: u16,
    pub visibility_meters: Option<f64>,
    pub cloud_layers: Vec<CloudLayer>,
    pub raw_message: Option<String>,
    pub timestamp: Option<String>, // ISO 8601, e.g. "2024-05-01T12:53:00+00:00"
}

impl Observation {
    pub fn is_not_found(&self) -> bool {
        self.http_status == HTTP_NOT_FOUND
    }

    /// Report text, or `None` when absent or empty.
    pub fn report_text(&self) -> Option<&str> {
        self.raw_message.as_deref().filter(|s| !s.is_empty())
    }
}

/// Output of the classifier; the renderer's only input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub airport_id: String,
    pub category: FlightCategory,
    pub visibility_miles: Option<f64>,
    pub raw_message: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or decoding an observation.
///
/// An unknown airport is *not* an error: it becomes an observation that the
/// classifier maps to UNDF.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response other than 404.
    Http(u16),
    /// The request could not be sent or the body could not be read.
    Request(String),
    /// The response body could not be deserialized.
    Parse(String),
    /// The response parsed but carried nothing usable.
    NoData(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(code) => write!(f, "HTTP error: {}", code),
            FetchError::Request(msg) => write!(f, "Request failed: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FetchError::NoData(what) => write!(f, "No data returned: {}", what),
        }
    }
}

impl std::error::Error for FetchError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
