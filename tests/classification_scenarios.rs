/// End-to-end classification scenarios
///
/// Each test builds an api.weather.gov latest-observation payload, runs it
/// through `ingest::nws::parse_observation` and classifies the result, the
/// same path the poller takes minus the network.
///
/// Run with: cargo test --test classification_scenarios

use flightcat_service::classify::{classify, classify_with_reported};
use flightcat_service::ingest::{checkwx, nws};
use flightcat_service::model::{
    ClassificationResult, FlightCategory, NO_REPORT_MESSAGE, UNDEFINED_AIRPORT_MESSAGE,
};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const METAR: &str = "KPIA 011254Z 18010KT 10SM FEW100 22/12 A3001";

/// Builds a payload; `layers` are (amount, base meters).
fn payload(raw_message: Value, visibility_m: Value, layers: &[(&str, f64)]) -> String {
    let cloud_layers: Vec<Value> = layers
        .iter()
        .map(|(amount, base)| {
            json!({ "base": { "unitCode": "wmoUnit:m", "value": base }, "amount": amount })
        })
        .collect();

    json!({
        "type": "Feature",
        "properties": {
            "timestamp": "2024-05-01T12:54:00+00:00",
            "rawMessage": raw_message,
            "visibility": { "unitCode": "wmoUnit:m", "value": visibility_m },
            "cloudLayers": cloud_layers
        }
    })
    .to_string()
}

fn classify_payload(status: u16, body: &str) -> ClassificationResult {
    let obs = nws::parse_observation("KPIA", status, body).expect("payload should parse");
    classify(&obs)
}

// ---------------------------------------------------------------------------
// 1. Precedence
// ---------------------------------------------------------------------------

#[test]
fn test_not_found_yields_undf() {
    let body = json!({ "status": 404, "detail": "Station not found" }).to_string();
    let result = classify_payload(404, &body);
    assert_eq!(result.category, FlightCategory::Undf);
    assert_eq!(result.raw_message, UNDEFINED_AIRPORT_MESSAGE);
}

#[test]
fn test_not_found_ignores_weather_in_body() {
    // Even a body that looks like real low weather cannot rescue a 404.
    let body = payload(json!(METAR), json!(400), &[("OVC", 30.0)]);
    assert_eq!(classify_payload(404, &body).category, FlightCategory::Undf);
}

#[test]
fn test_empty_report_with_low_overcast_is_lifr() {
    let body = payload(json!(""), Value::Null, &[("OVC", 140.0)]);
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Lifr, "~459 ft ceiling overrides NOWX");
    assert_eq!(result.raw_message, NO_REPORT_MESSAGE);
}

#[test]
fn test_null_properties_is_nowx() {
    let body = json!({ "type": "Feature", "properties": null }).to_string();
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Nowx);
    assert_eq!(result.raw_message, NO_REPORT_MESSAGE);
}

#[test]
fn test_empty_report_without_ceiling_is_nowx() {
    let body = payload(Value::Null, json!(16093), &[("SCT", 900.0)]);
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Nowx);
    assert_eq!(result.raw_message, NO_REPORT_MESSAGE);
}

// ---------------------------------------------------------------------------
// 2. Ceiling
// ---------------------------------------------------------------------------

#[test]
fn test_second_layer_decides_when_first_is_few() {
    let body = payload(
        json!(METAR),
        Value::Null,
        &[("FEW", 3000.0), ("BKN", 200.0), ("OVC", 30.0)],
    );
    assert_eq!(
        classify_payload(200, &body).category,
        FlightCategory::Ifr,
        "BKN at ~656 ft decides; the OVC at ~98 ft below it is never read"
    );
}

#[test]
fn test_ceiling_of_exactly_1000_ft_is_mvfr() {
    let body = payload(json!(METAR), Value::Null, &[("BKN", 304.8)]);
    assert_eq!(classify_payload(200, &body).category, FlightCategory::Mvfr);
}

#[test]
fn test_overcast_without_reported_base_is_lifr() {
    let body = json!({
        "properties": {
            "rawMessage": "KPIA 011254Z AUTO 10SM OVC/// 14/13 A2990",
            "visibility": { "unitCode": "wmoUnit:m", "value": 16093 },
            "cloudLayers": [ { "base": { "unitCode": "wmoUnit:m", "value": null }, "amount": "OVC" } ]
        }
    })
    .to_string();
    assert_eq!(classify_payload(200, &body).category, FlightCategory::Lifr);
}

#[test]
fn test_high_ceiling_is_vfr() {
    let body = payload(json!(METAR), json!(16093), &[("OVC", 1200.0)]); // ~3937 ft
    assert_eq!(classify_payload(200, &body).category, FlightCategory::Vfr);
}

// ---------------------------------------------------------------------------
// 3. Visibility
// ---------------------------------------------------------------------------

#[test]
fn test_good_visibility_does_not_upgrade_lifr_ceiling() {
    let body = payload(json!(METAR), json!(9656), &[("OVC", 100.0)]); // 6 SM
    assert_eq!(classify_payload(200, &body).category, FlightCategory::Lifr);
}

#[test]
fn test_low_visibility_degrades_clear_sky() {
    let body = payload(json!(METAR), json!(4023), &[]); // 2.5 SM
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Ifr);
    assert_eq!(result.visibility_miles, Some(2.5));
}

#[test]
fn test_visibility_is_rounded_before_banding() {
    // 4827 m is 2.9994 SM; two-decimal rounding makes it 3.00 SM, which is MVFR.
    let body = payload(json!(METAR), json!(4827), &[]);
    let result = classify_payload(200, &body);
    assert_eq!(result.visibility_miles, Some(3.0));
    assert_eq!(result.category, FlightCategory::Mvfr);
}

#[test]
fn test_null_visibility_skips_visibility_rule() {
    let body = payload(json!(METAR), Value::Null, &[("FEW", 600.0)]);
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Vfr);
    assert_eq!(result.visibility_miles, None);
}

#[test]
fn test_marginal_visibility_under_vfr_ceiling() {
    let body = payload(json!(METAR), json!(6440), &[("BKN", 1500.0)]); // ~4.0 SM
    let result = classify_payload(200, &body);
    assert_eq!(result.category, FlightCategory::Mvfr);
    assert_eq!(result.visibility_miles, Some(4.0));
}

// ---------------------------------------------------------------------------
// 4. Totality
// ---------------------------------------------------------------------------

#[test]
fn test_every_input_shape_yields_a_category() {
    let reports = [json!(METAR), json!(""), Value::Null];
    let visibilities = [Value::Null, json!(0), json!(1609), json!(8047), json!(16093)];
    let layer_sets: [&[(&str, f64)]; 4] = [
        &[],
        &[("FEW", 100.0)],
        &[("VV", 30.0)],
        &[("SCT", 500.0), ("BKN", 700.0), ("OVC", 1500.0)],
    ];

    for status in [200u16, 404] {
        for report in &reports {
            for visibility in &visibilities {
                for layers in &layer_sets {
                    let body = payload(report.clone(), visibility.clone(), layers);
                    let result = classify_payload(status, &body);
                    assert!(
                        FlightCategory::ALL.contains(&result.category),
                        "unexpected category {:?}",
                        result.category
                    );
                    assert!(!result.raw_message.is_empty());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Secondary provider
// ---------------------------------------------------------------------------

#[test]
fn test_reported_category_overrides_decoded_one() {
    let obs = nws::parse_observation("KPIA", 200, &payload(json!(METAR), json!(16093), &[]))
        .expect("payload should parse");
    let checkwx_body = json!({
        "results": 1,
        "data": [ { "icao": "KPIA", "flight_category": "MVFR" } ]
    })
    .to_string();

    let reported = checkwx::parse_reported_category(&checkwx_body).expect("valid CheckWX body");
    let result = classify_with_reported(&obs, reported);
    assert_eq!(result.category, FlightCategory::Mvfr);
    assert_eq!(result.raw_message, METAR);
}
