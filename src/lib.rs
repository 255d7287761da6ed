//! Flight category badges for a watchlist of airports.
//!
//! Fetches the latest NWS observation for each airport and derives a
//! VFR / MVFR / IFR / LIFR category (or NOWX / UNDF when there is nothing to
//! classify) for display on a sectional map.
//!
//! - `model`    — shared domain types
//! - `classify` — the observation -> category classifier
//! - `ingest`   — api.weather.gov client; CheckWX payload parsing (library-only)
//! - `badge`    — category -> display style
//! - `config`   — TOML watchlist and service settings
//! - `logging`  — console / file logging

pub mod badge;
pub mod classify;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
