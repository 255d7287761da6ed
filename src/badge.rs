//! Badge styling for classification results.
//!
//! The renderer keys its styling off the category alone; this module is the
//! single mapping from category to style class and detail link so that no
//! renderer grows its own copy.

use crate::model::{ClassificationResult, FlightCategory};

/// Visual style of a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Success,
    Primary,
    Danger,
    Lifr,
    NoWeather,
    Undefined,
}

impl BadgeStyle {
    pub fn for_category(category: FlightCategory) -> BadgeStyle {
        match category {
            FlightCategory::Vfr => BadgeStyle::Success,
            FlightCategory::Mvfr => BadgeStyle::Primary,
            FlightCategory::Ifr => BadgeStyle::Danger,
            FlightCategory::Lifr => BadgeStyle::Lifr,
            FlightCategory::Nowx => BadgeStyle::NoWeather,
            FlightCategory::Undf => BadgeStyle::Undefined,
        }
    }

    /// CSS class used by the web templates.
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeStyle::Success => "badge badge-success",
            BadgeStyle::Primary => "badge badge-primary",
            BadgeStyle::Danger => "badge badge-danger",
            BadgeStyle::Lifr => "badge-lifr",
            BadgeStyle::NoWeather => "badge-nowx",
            BadgeStyle::Undefined => "badge-undf",
        }
    }
}

/// Decoded METAR/TAF page for an airport on aviationweather.gov.
pub fn detail_url(airport_id: &str) -> String {
    format!(
        "https://www.aviationweather.gov/metar/data?ids={}&format=decoded&hours=0&taf=on&layout=on",
        airport_id.trim().to_ascii_uppercase()
    )
}

/// One-line text rendering: `"KPIA  IFR  KPIA 011254Z ..."`.
pub fn summary_line(result: &ClassificationResult) -> String {
    format!("{:<5} {:<4}  {}", result.airport_id, result.category, result.raw_message)
}
