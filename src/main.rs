//! Polls the configured airports once and prints one category line each.

use std::process::ExitCode;
use std::time::Duration;

use flightcat_service::badge;
use flightcat_service::classify::{classify, staleness};
use flightcat_service::config;
use flightcat_service::ingest::nws;
use flightcat_service::logging::{self, DataSource, LogLevel};
use flightcat_service::model::FlightCategory;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let path = config::config_path();
    let config = match config::load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = &config.service;
    let level = LogLevel::parse(&settings.log_level);
    logging::init_logger(level.unwrap_or(LogLevel::Info), settings.log_file.as_deref(), false);
    if level.is_none() {
        logging::warn(
            DataSource::Config,
            None,
            &format!("Unknown log_level {:?}, using info", settings.log_level),
        );
    }
    logging::info(
        DataSource::Config,
        None,
        &format!("Loaded {} airports from {}", config.airports.len(), path),
    );

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            logging::error(DataSource::System, None, &format!("Cannot build HTTP client: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let mut classified = 0;
    let mut failed = 0;

    for airport in &config.airports {
        let id = airport.id.as_str();
        let obs = match nws::fetch_latest(&client, &settings.api_base_url, &settings.user_agent, id) {
            Ok(obs) => obs,
            Err(e) => {
                logging::log_fetch_failure(DataSource::Nws, id, "Latest observation", &e);
                failed += 1;
                continue;
            }
        };

        let result = classify(&obs);
        classified += 1;

        match result.category {
            FlightCategory::Undf => logging::warn(
                DataSource::Nws,
                Some(id),
                "Station unknown to api.weather.gov; check the airport ID",
            ),
            _ => match staleness::is_stale(&obs, settings.max_observation_age_minutes) {
                Ok(false) => {}
                Ok(true) => logging::warn(
                    DataSource::Nws,
                    Some(id),
                    &format!(
                        "Observation older than {} minutes ({})",
                        settings.max_observation_age_minutes,
                        obs.timestamp.as_deref().unwrap_or("?")
                    ),
                ),
                Err(e) => logging::warn(DataSource::Nws, Some(id), &e),
            },
        }

        println!("{}", badge::summary_line(&result));
        logging::debug(
            DataSource::Nws,
            Some(id),
            &format!(
                "{} -> {}",
                badge::BadgeStyle::for_category(result.category).css_class(),
                badge::detail_url(id)
            ),
        );
    }

    logging::log_poll_summary(DataSource::System, config.airports.len(), classified, failed);
    ExitCode::SUCCESS
}
