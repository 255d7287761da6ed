/// Service configuration and airport watchlist.
///
/// Loaded from a TOML file (`airports.toml` by default, overridable with the
/// `FLIGHTCAT_CONFIG` environment variable). Every `[service]` setting has a
/// default, so a file containing only `[[airports]]` entries is valid.
///
/// ```toml
/// [service]
/// user_agent = "(flightcat, ops@example.com)"
/// max_observation_age_minutes = 90
///
/// [[airports]]
/// id = "KPIA"
/// name = "General Wayne A. Downing Peoria International"
/// ```

use serde::Deserialize;
use std::fs;

use crate::ingest::nws::NWS_BASE_URL;

pub const CONFIG_PATH_ENV: &str = "FLIGHTCAT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "airports.toml";

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub airports: Vec<Airport>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub api_base_url: String,
    /// api.weather.gov asks for a contact string in the User-Agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Observations older than this are reported as stale.
    pub max_observation_age_minutes: u64,
    /// "debug", "info", "warn" or "error".
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            api_base_url: NWS_BASE_URL.to_string(),
            user_agent: "(flightcat_service, contact unset)".to_string(),
            timeout_secs: 10,
            max_observation_age_minutes: 90,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// One watchlist entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Airport {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl ServiceConfig {
    /// Looks up an airport by ID, case-insensitively.
    pub fn find_airport(&self, id: &str) -> Option<&Airport> {
        self.airports.iter().find(|a| a.id.eq_ignore_ascii_case(id.trim()))
    }

    pub fn airport_ids(&self) -> Vec<&str> {
        self.airports.iter().map(|a| a.id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: String, message: String },
    /// The file is not valid TOML or does not match the schema.
    Parse(String),
    InvalidAirportId(String),
    DuplicateAirport(String),
    NoAirports,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => write!(f, "Cannot read {}: {}", path, message),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
            ConfigError::InvalidAirportId(id) => {
                write!(f, "Invalid airport ID {:?}: expected 3-4 letters or digits", id)
            }
            ConfigError::DuplicateAirport(id) => write!(f, "Airport {} is listed more than once", id),
            ConfigError::NoAirports => write!(f, "No airports configured"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Config path from `FLIGHTCAT_CONFIG`, else `airports.toml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Reads, parses and validates a config file.
pub fn load_config(path: &str) -> Result<ServiceConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_config(&text)
}

/// Parses and validates config text. Airport IDs are normalized to upper case.
pub fn parse_config(text: &str) -> Result<ServiceConfig, ConfigError> {
    let mut config: ServiceConfig =
        toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.airports.is_empty() {
        return Err(ConfigError::NoAirports);
    }

    let mut seen: Vec<String> = Vec::with_capacity(config.airports.len());
    for airport in &mut config.airports {
        validate_airport_id(&airport.id)?;
        airport.id = airport.id.trim().to_ascii_uppercase();
        if seen.contains(&airport.id) {
            return Err(ConfigError::DuplicateAirport(airport.id.clone()));
        }
        seen.push(airport.id.clone());
    }

    Ok(config)
}

/// Airport IDs are 3-4 ASCII letters or digits ("PIA", "KPIA", "C09").
pub fn validate_airport_id(id: &str) -> Result<(), ConfigError> {
    let id = id.trim();
    let valid = (3..=4).contains(&id.len()) && id.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidAirportId(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
