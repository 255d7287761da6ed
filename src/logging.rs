/// Structured logging for the flight category service
///
/// Provides context-rich logging with airport identifiers, timestamps, and
/// severity levels. Supports console output and an optional append-only
/// log file for unattended polling.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Parses "debug", "info", "warn"/"warning" or "error", any case.
    pub fn parse(level: &str) -> Option<LogLevel> {
        match level.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Nws,
    Config,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Nws => write!(f, "NWS"),
            DataSource::Config => write!(f, "CFG"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - station not reporting or temporarily unavailable
    Expected,
    /// Unexpected failure - indicates service degradation or configuration issue
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

/// Locks the global logger. A poisoned lock only means another thread
/// panicked mid-log; the logger itself is still usable.
fn logger_slot() -> MutexGuard<'static, Option<Logger>> {
    LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *logger_slot() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: &DataSource, airport_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let airport_part = airport_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format_entry(&timestamp.to_string(), level, source, airport_part.as_str(), message);

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, airport_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, airport_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

/// `2024-05-01 13:00:00 UTC WARN NWS [KPIA]: message`
fn format_entry(
    timestamp: &str,
    level: LogLevel,
    source: &DataSource,
    airport_part: &str,
    message: &str,
) -> String {
    format!("{} {} {}{}: {}", timestamp, level, source, airport_part, message)
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, source: DataSource, airport_id: Option<&str>, message: &str) {
    if let Some(logger) = logger_slot().as_ref() {
        logger.log(level, &source, airport_id, message);
    }
}

/// Log a general informational message
pub fn info(source: DataSource, airport_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, source, airport_id, message);
}

/// Log a warning message
pub fn warn(source: DataSource, airport_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Warning, source, airport_id, message);
}

/// Log an error message
pub fn error(source: DataSource, airport_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, source, airport_id, message);
}

/// Log a debug message
pub fn debug(source: DataSource, airport_id: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, source, airport_id, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify an observation fetch failure from its error text
pub fn classify_fetch_failure(error_message: &str) -> FailureType {
    // Stations that are up but silent return an observation with no data
    if error_message.contains("No data returned") {
        FailureType::Expected
    }
    // 5xx from api.weather.gov is common under load but still worth an error
    else if error_message.contains("HTTP error") || error_message.contains("timed out") {
        FailureType::Unexpected
    }
    // Parse errors suggest API changes
    else if error_message.contains("Parse error") {
        FailureType::Unexpected
    } else {
        FailureType::Unknown
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a fetch failure with automatic classification
pub fn log_fetch_failure(source: DataSource, airport_id: &str, operation: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_fetch_failure(&error_msg);

    let message = format!("{} failed [{}]: {}", operation, failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(source, Some(airport_id), &message),
        FailureType::Unexpected => error(source, Some(airport_id), &message),
        FailureType::Unknown => warn(source, Some(airport_id), &message),
    }
}

// ---------------------------------------------------------------------------
// Poll Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of one polling pass over the watchlist
pub fn log_poll_summary(source: DataSource, total: usize, successful: usize, failed: usize) {
    let message = format!(
        "Poll complete: {}/{} classified, {} failed",
        successful, total, failed
    );

    if failed == 0 {
        info(source, None, &message);
    } else if successful == 0 {
        error(source, None, &message);
    } else {
        warn(source, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchError;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("verbose"), None);
    }

    #[test]
    fn test_failure_classification() {
        let no_data = FetchError::NoData("KPIA".to_string()).to_string();
        assert_eq!(classify_fetch_failure(&no_data), FailureType::Expected);

        let http = FetchError::Http(500).to_string();
        assert_eq!(classify_fetch_failure(&http), FailureType::Unexpected);

        let parse = FetchError::Parse("EOF".to_string()).to_string();
        assert_eq!(classify_fetch_failure(&parse), FailureType::Unexpected);

        let request = FetchError::Request("dns error".to_string()).to_string();
        assert_eq!(classify_fetch_failure(&request), FailureType::Unknown);
    }

    #[test]
    fn test_logging_survives_poisoned_lock() {
        let path = std::env::temp_dir().join(format!("flightcat_logging_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let joined: std::thread::Result<()> = std::thread::spawn(|| {
            let _guard = LOGGER.lock();
            panic!("logger lock held during panic");
        })
        .join();
        assert!(joined.is_err());
        assert!(LOGGER.is_poisoned(), "lock should be poisoned before logging");

        init_logger(LogLevel::Debug, path.to_str(), false);
        warn(DataSource::Nws, Some("KPIA"), "written after poison");

        let contents = std::fs::read_to_string(&path).expect("log file should be written");
        assert!(
            contents.contains("WARN NWS [KPIA]: written after poison"),
            "log file contents: {:?}",
            contents
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_entry_format() {
        let entry = format_entry(
            "2024-05-01 13:00:00 UTC",
            LogLevel::Warning,
            &DataSource::Nws,
            " [KPIA]",
            "stale observation",
        );
        assert_eq!(entry, "2024-05-01 13:00:00 UTC WARN NWS [KPIA]: stale observation");
    }
}
