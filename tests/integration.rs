//! Integration tests for the PlayRent pricing API.
//!
//! These drive the full router against the shipped configuration in
//! `config/playrent` and cover:
//! - Booking prices (weekend multiplier, lights, add-ons, rounding)
//! - Same-day overlap checks
//! - Recurrence expansion (missing days, caps, until dates)
//! - Series quotes with conflicts
//! - Error responses

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use playrent_pricing::api::{AppState, create_router};
use playrent_pricing::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/playrent"))
        .expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router_for_test().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn quote_request(rate: &str, minutes: u32, date: &str, start: &str, add_ons: Value) -> Value {
    json!({
        "base_price_per_hour": rate,
        "duration_minutes": minutes,
        "date": date,
        "start_time": start,
        "add_ons": add_ons
    })
}

fn assert_total(result: &Value, expected: &str) {
    let actual = result["total"].as_str().unwrap();
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected total {}, got {}",
        expected,
        actual
    );
}

fn dates(result: &Value) -> Vec<String> {
    result["occurrences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Booking Prices
// =============================================================================

#[tokio::test]
async fn test_saturday_morning_pays_weekend_multiplier() {
    // 100 * 1.15
    let (status, result) = post("/quote", quote_request("100", 60, "2024-01-06", "10:00", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "115.00");
    assert_eq!(result["total"], "115.00");
}

#[tokio::test]
async fn test_weekday_evening_pays_lights_fee() {
    // 100 + 25
    let (status, result) = post("/quote", quote_request("100", 60, "2024-01-03", "19:00", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "125.00");
}

#[tokio::test]
async fn test_weekend_evening_with_equipment_and_coach() {
    // 50 * 2h = 100, * 1.15 = 115, + 25 lights + 15 equipment + 50 coach
    let (status, result) = post(
        "/quote",
        quote_request(
            "50",
            120,
            "2024-01-06",
            "19:00",
            json!({ "equipment_pack": true, "coach": true }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "205.00");
}

#[tokio::test]
async fn test_sunday_counts_as_weekend() {
    let (_, result) = post("/quote", quote_request("100", 60, "2024-01-07", "10:00", json!({}))).await;
    assert_total(&result, "115.00");
}

#[tokio::test]
async fn test_lights_requested_during_the_day() {
    let (_, result) = post(
        "/quote",
        quote_request("100", 60, "2024-01-03", "10:00", json!({ "lights": true })),
    )
    .await;
    assert_total(&result, "125.00");
}

#[tokio::test]
async fn test_lights_fee_charged_once_in_the_evening() {
    let (_, result) = post(
        "/quote",
        quote_request("100", 60, "2024-01-03", "19:00", json!({ "lights": true })),
    )
    .await;
    assert_total(&result, "125.00");
}

#[tokio::test]
async fn test_partial_hour_is_prorated() {
    // 80 * 45 / 60
    let (_, result) = post("/quote", quote_request("80", 45, "2024-01-03", "10:00", json!({}))).await;
    assert_total(&result, "60.00");
}

#[tokio::test]
async fn test_total_is_rounded_to_cents() {
    // 33.33 * 1.15 = 38.3295
    let (_, result) = post("/quote", quote_request("33.33", 60, "2024-01-06", "10:00", json!({}))).await;
    assert_eq!(result["total"], "38.33");
}

#[tokio::test]
async fn test_legacy_add_on_name_is_accepted() {
    let (_, result) = post(
        "/quote",
        quote_request("100", 60, "2024-01-03", "10:00", json!({ "equipmentPack": true })),
    )
    .await;
    assert_total(&result, "115.00");
}

#[tokio::test]
async fn test_quote_from_field_catalog() {
    // Grass Field at 80/hour, Saturday evening, 90 minutes: 120 * 1.15 + 25
    let (status, result) = post(
        "/quote",
        json!({
            "field_id": 3,
            "duration_minutes": 90,
            "date": "2024-01-06",
            "start_time": "20:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_total(&result, "163.00");
}

#[tokio::test]
async fn test_quote_lists_lines_and_audit_steps() {
    let (_, result) = post(
        "/quote",
        quote_request("100", 60, "2024-01-06", "19:00", json!({ "coach": true })),
    )
    .await;

    let categories: Vec<&str> = result["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| line["category"].as_str().unwrap())
        .collect();
    assert!(categories.contains(&"base"));
    assert!(categories.contains(&"weekend"));
    assert!(categories.contains(&"lights"));
    assert!(categories.contains(&"coach"));
    assert!(!categories.contains(&"equipment_pack"));

    let rule_ids: Vec<&str> = result["audit_steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(rule_ids.first(), Some(&"base_cost"));
    assert_eq!(rule_ids.last(), Some(&"rounding"));
}

#[tokio::test]
async fn test_quote_formatted_total() {
    let (_, result) = post("/quote", quote_request("1000", 90, "2024-01-06", "10:00", json!({}))).await;
    assert_eq!(result["formatted_total"], "$1,725.00");
}

#[tokio::test]
async fn test_oversized_rate_is_rejected() {
    let (status, result) = post(
        "/quote",
        quote_request("79228162514264337593543950335", 600, "2024-01-03", "10:00", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_duration_longer_than_a_day_is_rejected() {
    let (status, result) = post(
        "/quote",
        quote_request("100", 4_294_967_295, "2024-01-03", "10:00", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_quote_envelope_metadata() {
    let (_, first) = post("/quote", quote_request("100", 60, "2024-01-03", "10:00", json!({}))).await;
    let (_, second) = post("/quote", quote_request("100", 60, "2024-01-03", "10:00", json!({}))).await;

    assert_ne!(first["quote_id"], second["quote_id"]);
    assert_eq!(first["total"], second["total"]);
    assert!(first["generated_at"].is_string());
    assert_eq!(first["engine_version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// SECTION 2: Overlap
// =============================================================================

async fn overlap(start1: &str, end1: &str, start2: &str, end2: &str) -> (StatusCode, Value) {
    post(
        "/overlap",
        json!({ "start1": start1, "end1": end1, "start2": start2, "end2": end2 }),
    )
    .await
}

#[tokio::test]
async fn test_partial_overlap() {
    let (status, result) = overlap("10:00", "11:00", "10:30", "11:30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["overlap"], true);
}

#[tokio::test]
async fn test_touching_windows_do_not_overlap() {
    let (_, result) = overlap("10:00", "11:00", "11:00", "12:00").await;
    assert_eq!(result["overlap"], false);
}

#[tokio::test]
async fn test_containing_window_overlaps() {
    let (_, result) = overlap("09:00", "12:00", "10:00", "10:30").await;
    assert_eq!(result["overlap"], true);
}

#[tokio::test]
async fn test_overlap_rejects_bad_time() {
    let (status, result) = overlap("10:00", "11:00", "ten", "11:30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_TIME_FORMAT");
}

// =============================================================================
// SECTION 3: Recurrence
// =============================================================================

#[tokio::test]
async fn test_monthly_last_day_includes_leap_day() {
    let (status, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-01-31",
            "rule": { "frequency": "monthly", "occurrence_count": 3, "missing_day_policy": "last-day" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dates(&result), ["2024-01-31", "2024-02-29", "2024-03-31"]);
    assert!(result["skipped"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_monthly_skip_reports_missing_month() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-01-31",
            "rule": { "frequency": "monthly", "occurrence_count": 3 }
        }),
    )
    .await;

    assert_eq!(dates(&result), ["2024-01-31", "2024-03-31"]);
    assert_eq!(result["skipped"][0]["step"], 1);
    assert_eq!(result["skipped"][0]["period_start"], "2024-02-01");
    assert_eq!(result["skipped"][0]["reason"], "missing_day");
}

#[tokio::test]
async fn test_none_returns_only_the_anchor() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-05-17",
            "rule": { "frequency": "none", "occurrence_count": 10, "until_date": "2025-01-01" }
        }),
    )
    .await;

    assert_eq!(dates(&result), ["2024-05-17"]);
}

#[tokio::test]
async fn test_occurrences_are_capped() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-01-01",
            "rule": { "frequency": "monthly", "occurrence_count": 100 }
        }),
    )
    .await;

    let dates = dates(&result);
    assert_eq!(dates.len(), 52);
    assert_eq!(dates.last().unwrap(), "2028-04-01");
}

#[tokio::test]
async fn test_default_count_when_omitted() {
    let (_, result) = post(
        "/occurrences",
        json!({ "anchor_date": "2024-01-10", "rule": { "frequency": "monthly" } }),
    )
    .await;

    assert_eq!(dates(&result).len(), 12);
}

#[tokio::test]
async fn test_until_date_is_inclusive() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-01-15",
            "rule": { "frequency": "monthly", "occurrence_count": 12, "until_date": "2024-04-15" }
        }),
    )
    .await;

    assert_eq!(
        dates(&result),
        ["2024-01-15", "2024-02-15", "2024-03-15", "2024-04-15"]
    );
}

#[tokio::test]
async fn test_yearly_leap_day_falls_back_to_february_28() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-02-29",
            "rule": { "frequency": "yearly", "occurrence_count": 5 }
        }),
    )
    .await;

    assert_eq!(
        dates(&result),
        ["2024-02-29", "2025-02-28", "2026-02-28", "2027-02-28", "2028-02-29"]
    );
}

#[tokio::test]
async fn test_legacy_rule_names_are_accepted() {
    let (_, result) = post(
        "/occurrences",
        json!({
            "anchor_date": "2024-01-31",
            "rule": { "freq": "monthly", "count": 2, "handleMissingDay": "last-day" }
        }),
    )
    .await;

    assert_eq!(dates(&result), ["2024-01-31", "2024-02-29"]);
}

#[tokio::test]
async fn test_occurrences_bad_anchor_date() {
    let (status, result) = post(
        "/occurrences",
        json!({ "anchor_date": "2024-02-30", "rule": { "frequency": "monthly" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
}

// =============================================================================
// SECTION 4: Series Quotes
// =============================================================================

#[tokio::test]
async fn test_series_quote_with_overlapping_reservation() {
    // Indoor Court, 60/hour, 18:00 for an hour
    // 2024-01-03 Wed: 60 + 25 = 85
    // 2024-02-03 Sat: 69 + 25 = 94 (clashes with the booked slot)
    // 2024-03-03 Sun: 69 + 25 = 94
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 2,
            "date": "2024-01-03",
            "start_time": "18:00",
            "duration_minutes": 60,
            "recurrence": { "frequency": "monthly", "occurrence_count": 3 },
            "booked": [
                { "date": "2024-02-03", "start": "17:30", "end": "18:30" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let occurrences = result["occurrences"].as_array().unwrap();
    assert_eq!(occurrences.len(), 3);
    assert_eq!(occurrences[0]["total"], "85.00");
    assert!(occurrences[0].get("conflict").is_none());
    assert_eq!(occurrences[1]["conflict"]["kind"], "overlap");
    assert_eq!(occurrences[1]["conflict"]["start"], "17:30");
    assert_eq!(occurrences[2]["total"], "94.00");
    assert_eq!(result["conflict_count"], 1);
    assert_total(&result, "179.00");
    assert_eq!(result["formatted_total"], "$179.00");
    assert!(result["quote_id"].is_string());
}

#[tokio::test]
async fn test_series_quote_outside_opening_hours() {
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 2,
            "date": "2024-01-03",
            "start_time": "21:30",
            "duration_minutes": 60,
            "recurrence": { "frequency": "none" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let conflict = &result["occurrences"][0]["conflict"];
    assert_eq!(conflict["kind"], "outside_opening_hours");
    assert_eq!(conflict["open"], "08:00");
    assert_eq!(conflict["close"], "22:00");
    assert_total(&result, "0");
}

#[tokio::test]
async fn test_series_quote_until_midnight_closing() {
    // Grass Field closes at 00:00; 22:00 + 2h ends exactly at midnight
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 3,
            "date": "2024-01-03",
            "start_time": "22:00",
            "duration_minutes": 120,
            "recurrence": { "frequency": "none" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["occurrences"][0]["end"], "24:00");
    assert_eq!(result["conflict_count"], 0);
    assert_total(&result, "185.00");
}

#[tokio::test]
async fn test_series_quote_blackout_date() {
    let (_, result) = post(
        "/series-quote",
        json!({
            "field_id": 1,
            "date": "2024-10-25",
            "start_time": "10:00",
            "duration_minutes": 60,
            "recurrence": { "frequency": "monthly", "occurrence_count": 3 }
        }),
    )
    .await;

    assert_eq!(result["occurrences"][2]["date"], "2024-12-25");
    assert_eq!(result["occurrences"][2]["conflict"]["kind"], "blackout");
}

#[tokio::test]
async fn test_series_quote_past_midnight_is_rejected() {
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 1,
            "date": "2024-01-03",
            "start_time": "23:30",
            "duration_minutes": 60,
            "recurrence": { "frequency": "none" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_series_quote_huge_duration_is_rejected() {
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 1,
            "date": "2024-01-03",
            "start_time": "10:00",
            "duration_minutes": 4_294_967_295u32,
            "recurrence": { "frequency": "none" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_series_quote_rejects_backwards_booked_slot() {
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 1,
            "date": "2024-01-03",
            "start_time": "22:00",
            "duration_minutes": 60,
            "recurrence": { "frequency": "none" },
            "booked": [
                { "date": "2024-01-03", "start": "22:00", "end": "01:00" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
    assert!(result["details"].as_str().unwrap().contains("booked"));
}

#[tokio::test]
async fn test_series_quote_unknown_field() {
    let (status, result) = post(
        "/series-quote",
        json!({
            "field_id": 404,
            "date": "2024-01-03",
            "start_time": "10:00",
            "duration_minutes": 60
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(result["code"], "FIELD_NOT_FOUND");
}

// =============================================================================
// SECTION 5: Errors and Catalog
// =============================================================================

#[tokio::test]
async fn test_zero_duration_is_rejected() {
    let (status, result) = post("/quote", quote_request("100", 0, "2024-01-03", "10:00", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let (status, result) = post("/quote", quote_request("-5", 60, "2024-01-03", "10:00", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let (status, result) = post("/quote", quote_request("100", 60, "2024-13-01", "10:00", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
    assert!(result["message"].as_str().unwrap().contains("2024-13-01"));
}

#[tokio::test]
async fn test_missing_rate_source_is_rejected() {
    let (status, result) = post(
        "/quote",
        json!({ "duration_minutes": 60, "date": "2024-01-03", "start_time": "10:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_BOOKING");
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, result) = send(
        Request::builder()
            .method("POST")
            .uri("/quote")
            .header("Content-Type", "application/json")
            .body(Body::from("{\"duration_minutes\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type() {
    let (status, result) = send(
        Request::builder()
            .method("POST")
            .uri("/overlap")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_field_catalog() {
    let (status, result) = get("/fields").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["currency"], "USD");
    let fields = result["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["id"], 1);
    assert_eq!(fields[0]["open_hour"], "06:00");
    assert_eq!(fields[1]["sports"], json!(["basketball", "tennis"]));
}

#[tokio::test]
async fn test_health() {
    let (status, result) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "ok");
}
