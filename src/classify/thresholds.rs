//! Ceiling and visibility bands for the four flight-rules categories.
//!
//! | Category | Ceiling (ft AGL)  | Visibility (SM)  |
//! |----------|-------------------|------------------|
//! | VFR      | above 3,000       | above 5          |
//! | MVFR     | 1,000 to 3,000    | 3 to 5           |
//! | IFR      | 500 to below 1,000| 1 to below 3     |
//! | LIFR     | below 500         | below 1          |
//!
//! Band edges are inclusive exactly as the table reads; 1,000 ft is MVFR and
//! 5.00 SM is MVFR.

use crate::model::{FlightRules, FEET_PER_METER, FEET_PER_STATUTE_MILE};

/// Cloud base in whole feet, rounded to nearest.
pub fn meters_to_feet(meters: f64) -> i64 {
    (meters * FEET_PER_METER).round() as i64
}

/// Visibility in statute miles, rounded to two decimals.
pub fn meters_to_statute_miles(meters: f64) -> f64 {
    let miles = meters * FEET_PER_METER / FEET_PER_STATUTE_MILE;
    (miles * 100.0).round() / 100.0
}

/// Category implied by a ceiling height.
pub fn ceiling_rules(ceiling_ft: i64) -> FlightRules {
    match ceiling_ft {
        ft if ft < 500 => FlightRules::Lifr,
        500..=999 => FlightRules::Ifr,
        1000..=3000 => FlightRules::Mvfr,
        _ => FlightRules::Vfr,
    }
}

/// Category implied by visibility, or `None` above 5 SM.
///
/// `None` means "no restriction": the ceiling-derived category stands.
/// NaN compares false against every band and also yields `None`.
pub fn visibility_rules(miles: f64) -> Option<FlightRules> {
    if miles < 1.0 {
        Some(FlightRules::Lifr)
    } else if (1.0..3.0).contains(&miles) {
        Some(FlightRules::Ifr)
    } else if (3.0..=5.0).contains(&miles) {
        Some(FlightRules::Mvfr)
    } else {
        None
    }
}
