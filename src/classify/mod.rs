/// Flight category classification.
///
/// Turns one parsed `Observation` into a `ClassificationResult`. The
/// classifier is total: every observation, including a completely empty one,
/// maps to exactly one category. It does no I/O and reads no clock, so the
/// same observation always yields the same result.
///
/// Precedence:
///   1. 404 from the weather API            -> UNDF, nothing else evaluated
///   2. no report text                       -> NOWX, unless a ceiling layer
///                                              is found in step 3
///   3. first restrictive ceiling layer      -> its category (else VFR)
///   4. visibility                           -> can only make 3 worse
///
/// Submodules:
/// - `thresholds` — unit conversion and the ceiling / visibility bands.
/// - `staleness`  — observation age checks (advisory, never affects category).

pub mod staleness;
pub mod thresholds;

use std::ops::ControlFlow;

use crate::model::{
    ClassificationResult, CloudLayer, FlightCategory, FlightRules, Observation,
    NO_REPORT_MESSAGE, UNDEFINED_AIRPORT_MESSAGE,
};
use thresholds::{ceiling_rules, meters_to_feet, meters_to_statute_miles, visibility_rules};

// ---------------------------------------------------------------------------
// Ceiling scan
// ---------------------------------------------------------------------------

/// Scans cloud layers in report order and returns the ceiling category.
///
/// Only ceiling-forming layers (BKN, OVC, OVX, VV) are considered. A layer
/// whose base was not reported (`OVC///`) is taken as a 0 ft ceiling. The
/// scan stops at the first layer whose ceiling is worse than VFR; layers
/// after it are never read. Returns `None` when no layer is
/// ceiling-forming, and `Some(Vfr)` when every ceiling was above 3,000 ft.
///
/// Layer order is not assumed to be lowest-first: a high BKN layer listed
/// before a low OVC layer yields VFR for the first and keeps scanning.
pub fn scan_ceiling<'a, I>(layers: I) -> Option<FlightRules>
where
    I: IntoIterator<Item = &'a CloudLayer>,
{
    let scan = layers
        .into_iter()
        .filter(|layer| layer.amount.is_ceiling_forming())
        .map(|layer| layer.base_meters.unwrap_or(0.0))
        .try_fold(None, |_, base_meters| {
            match ceiling_rules(meters_to_feet(base_meters)) {
                FlightRules::Vfr => ControlFlow::Continue(Some(FlightRules::Vfr)),
                restricted => ControlFlow::Break(restricted),
            }
        });

    match scan {
        ControlFlow::Break(rules) => Some(rules),
        ControlFlow::Continue(rules) => rules,
    }
}

/// Degrades `rules` by the visibility signal, if any.
///
/// LIFR is already the worst value, so a LIFR ceiling is never touched.
fn apply_visibility(rules: FlightRules, visibility_miles: Option<f64>) -> FlightRules {
    visibility_miles
        .and_then(visibility_rules)
        .map_or(rules, |from_visibility| rules.worse(from_visibility))
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies an observation.
pub fn classify(obs: &Observation) -> ClassificationResult {
    if obs.is_not_found() {
        return ClassificationResult {
            airport_id: obs.airport_id.clone(),
            category: FlightCategory::Undf,
            visibility_miles: None,
            raw_message: UNDEFINED_AIRPORT_MESSAGE.to_string(),
        };
    }

    let visibility_miles = obs.visibility_meters.map(meters_to_statute_miles);
    let ceiling = scan_ceiling(&obs.cloud_layers);
    let report = obs.report_text();

    let category = match (report, ceiling) {
        // Without report text only a ceiling layer can replace NOWX.
        (None, None) => FlightCategory::Nowx,
        (_, ceiling) => {
            let rules = ceiling.unwrap_or(FlightRules::Vfr);
            apply_visibility(rules, visibility_miles).into()
        }
    };

    ClassificationResult {
        airport_id: obs.airport_id.clone(),
        category,
        visibility_miles,
        raw_message: report.unwrap_or(NO_REPORT_MESSAGE).to_string(),
    }
}

/// Classifies an observation when a provider may already report a category.
///
/// A reported category is used verbatim in place of the decoded one; the
/// decode only runs when nothing was reported. An unknown airport is UNDF
/// either way. Not used by the poller; see `ingest::checkwx`.
pub fn classify_with_reported(obs: &Observation, reported: Option<FlightRules>) -> ClassificationResult {
    let mut result = classify(obs);
    if let Some(rules) = reported {
        if result.category != FlightCategory::Undf {
            result.category = rules.into();
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
