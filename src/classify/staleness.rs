/// Observation staleness detection.
///
/// api.weather.gov keeps serving the "latest" observation long after a
/// station stops reporting. A badge built from a day-old METAR looks just as
/// current as a fresh one, so callers check age separately and flag it.
/// Staleness never feeds into the category.
///
/// # Clock injection
/// `is_stale_at` takes `now` as a parameter rather than calling `Utc::now()`
/// so tests stay deterministic.

use chrono::{DateTime, Utc};

use crate::model::Observation;

/// Returns `true` if the observation is older than `max_age_minutes`
/// relative to `now`.
///
/// Staleness is strictly greater than the threshold:
///   age > max_age_minutes  →  stale
///   age == max_age_minutes →  not stale
///
/// Returns an error if the timestamp is missing or cannot be parsed.
/// Callers should treat that as stale.
pub fn is_stale_at(
    obs: &Observation,
    max_age_minutes: u64,
    now: DateTime<Utc>,
) -> Result<bool, String> {
    let raw = obs
        .timestamp
        .as_deref()
        .ok_or_else(|| format!("{}: observation has no timestamp", obs.airport_id))?;

    let observed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("{}: invalid timestamp {:?}: {}", obs.airport_id, raw, e))?
        .with_timezone(&Utc);

    // Clock skew can put an observation slightly in the future; that is fresh.
    let age_minutes = (now - observed).num_minutes().max(0) as u64;
    Ok(age_minutes > max_age_minutes)
}

/// Convenience wrapper that uses the real current time.
pub fn is_stale(obs: &Observation, max_age_minutes: u64) -> Result<bool, String> {
    is_stale_at(obs, max_age_minutes, Utc::now())
}
