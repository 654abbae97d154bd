//! Integration tests for the Emission Computation Engine HTTP API.
//!
//! This test suite covers:
//! - Trip emissions (base rate, traffic, vehicle age, passengers)
//! - Electric energy estimates
//! - Strict shift emissions and interval validation
//! - Tolerant shift recalculation
//! - Material emissions
//! - Factor table endpoints
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use emission_engine::api::{AppState, create_router};
use emission_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/factors").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

fn create_trip(vehicle: &str, fuel: &str, distance_km: &str) -> Value {
    json!({
        "vehicle_type": vehicle,
        "fuel_type": fuel,
        "distance_km": distance_km
    })
}

fn create_shift(machine: &str, date: &str, start: &str, end: &str) -> Value {
    json!({
        "machine_id": machine,
        "shift_start": format!("{}T{}", date, start),
        "shift_end": format!("{}T{}", date, end)
    })
}

fn with_lunch(mut shift: Value, date: &str, start: &str, end: &str) -> Value {
    shift["lunch_break_start"] = json!(format!("{}T{}", date, start));
    shift["lunch_break_end"] = json!(format!("{}T{}", date, end));
    shift
}

fn assert_decimal_field(result: &Value, field: &str, expected: &str) {
    let actual = result["result"][field].as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn rule_ids(result: &Value) -> Vec<String> {
    result["result"]["audit_steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// SECTION 1: Trip Emissions
// =============================================================================

#[tokio::test]
async fn test_trip_car_petrol_light_traffic() {
    // 100 km x 0.192 kg/km = 19.2 kg
    let (status, result) = post(
        create_router_for_test(),
        "/trips/calculate",
        create_trip("car", "petrol", "100"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "19.2");
    assert_decimal_field(&result, "per_passenger_emission_kg", "19.2");
    assert!(result["calculation_id"].is_string());
    assert!(result["engine_version"].is_string());
}

#[tokio::test]
async fn test_trip_car_petrol_heavy_traffic() {
    // 19.2 + 100 x 0.05 = 24.2 kg
    let mut trip = create_trip("car", "petrol", "100");
    trip["traffic_condition"] = json!("heavy");

    let (status, result) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "24.2");
}

#[tokio::test]
async fn test_trip_with_vehicle_age() {
    // (19.2 + 2) x (1 + 4 x 0.005) = 21.624 kg
    let mut trip = create_trip("car", "petrol", "100");
    trip["traffic_condition"] = json!("moderate");
    trip["vehicle_age_years"] = json!(4);

    let (status, result) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "21.624");
}

#[tokio::test]
async fn test_trip_audit_steps_in_order() {
    let (status, result) = post(
        create_router_for_test(),
        "/trips/calculate",
        create_trip("truck", "diesel", "40"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rule_ids(&result),
        vec![
            "base_rate_lookup",
            "base_emission",
            "traffic_addition",
            "age_penalty",
            "per_passenger_share"
        ]
    );
}

#[tokio::test]
async fn test_trip_bus_is_per_passenger_km() {
    // 20 km x 0.067 x 40 passengers = 53.6 kg, 1.34 kg each
    let mut trip = create_trip("bus", "diesel", "20");
    trip["passenger_count"] = json!(40);

    let (status, result) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "53.6");
    assert_decimal_field(&result, "per_passenger_emission_kg", "1.34");
}

#[tokio::test]
async fn test_trip_car_shared_by_passengers() {
    // 50 km x 0.171 = 8.55 kg over 4 passengers
    let mut trip = create_trip("car", "diesel", "50");
    trip["passenger_count"] = json!(4);

    let (status, result) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "8.55");
    assert_decimal_field(&result, "per_passenger_emission_kg", "2.1375");
}

#[tokio::test]
async fn test_trip_electric_includes_energy_estimate() {
    // 71.6 km x 0.022 = 1.5752 kg; 1.5752 / 0.716 = 2.2 kWh
    let mut trip = create_trip("scooter", "electric", "71.6");
    trip["travel_time_minutes"] = json!("95");

    let (status, result) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_emission_kg", "1.5752");
    assert_decimal_field(&result, "estimated_energy_kwh", "2.2");
    assert_decimal_field(&result, "travel_time_minutes", "95");
}

#[tokio::test]
async fn test_trip_combustion_has_no_energy_estimate() {
    let (status, result) = post(
        create_router_for_test(),
        "/trips/calculate",
        create_trip("car", "hybrid", "10"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["result"].get("estimated_energy_kwh").is_none());
}

// =============================================================================
// SECTION 2: Strict Shift Emissions
// =============================================================================

#[tokio::test]
async fn test_shift_sole_molding_with_lunch() {
    // (8h - 1h lunch) x 20 kg/h = 140 kg
    let shift = with_lunch(
        create_shift("sole_molding", "2026-01-15", "09:00", "17:00"),
        "2026-01-15",
        "12:00",
        "13:00",
    );

    let (status, result) = post(create_router_for_test(), "/shifts/calculate", shift).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "running_hours", "7");
    assert_decimal_field(&result, "emission_rate", "20");
    assert_decimal_field(&result, "carbon_emission_kg", "140");
}

#[tokio::test]
async fn test_shift_without_lunch() {
    // 09:00-13:30 x 10 kg/h = 45 kg
    let (status, result) = post(
        create_router_for_test(),
        "/shifts/calculate",
        create_shift("lasting", "2026-01-14", "09:00", "13:30"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "running_hours", "4.5");
    assert_decimal_field(&result, "carbon_emission_kg", "45");
}

#[tokio::test]
async fn test_shift_unknown_machine_emits_zero() {
    let (status, result) = post(
        create_router_for_test(),
        "/shifts/calculate",
        create_shift("laser_cutter", "2026-01-15", "09:00", "17:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "running_hours", "8");
    assert_decimal_field(&result, "carbon_emission_kg", "0");
}

#[tokio::test]
async fn test_shift_offset_timestamps_use_wall_clock() {
    let shift = json!({
        "machine_id": "adhesive_drying",
        "shift_start": "2026-01-15T08:00:00+05:30",
        "shift_end": "2026-01-15T10:00:00+05:30"
    });

    let (status, result) = post(create_router_for_test(), "/shifts/calculate", shift).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "carbon_emission_kg", "30");
}

#[tokio::test]
async fn test_shift_on_sunday_rejected() {
    // 2026-01-18 is a Sunday
    let (status, error) = post(
        create_router_for_test(),
        "/shifts/calculate",
        create_shift("lasting", "2026-01-18", "09:00", "17:00"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "REST_DAY_NOT_ALLOWED");
}

#[tokio::test]
async fn test_shift_end_before_start_rejected() {
    let (status, error) = post(
        create_router_for_test(),
        "/shifts/calculate",
        create_shift("lasting", "2026-01-15", "17:00", "09:00"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "END_BEFORE_START");
}

#[tokio::test]
async fn test_shift_zero_length_rejected() {
    let (status, error) = post(
        create_router_for_test(),
        "/shifts/calculate",
        create_shift("lasting", "2026-01-15", "09:00", "09:00"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "END_BEFORE_START");
}

#[tokio::test]
async fn test_shift_lunch_outside_shift_rejected() {
    let shift = with_lunch(
        create_shift("lasting", "2026-01-15", "09:00", "12:00"),
        "2026-01-15",
        "12:30",
        "13:30",
    );

    let (status, error) = post(create_router_for_test(), "/shifts/calculate", shift).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_LUNCH_BREAK");
}

#[tokio::test]
async fn test_shift_missing_machine_rejected() {
    let shift = json!({
        "shift_start": "2026-01-15T09:00",
        "shift_end": "2026-01-15T17:00"
    });

    let (status, error) = post(create_router_for_test(), "/shifts/calculate", shift).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_FIELD");
    assert!(error["message"].as_str().unwrap().contains("machine_id"));
}

#[tokio::test]
async fn test_shift_unparseable_start_rejected() {
    let shift = json!({
        "machine_id": "lasting",
        "shift_start": "not a time",
        "shift_end": "2026-01-15T17:00"
    });

    let (status, error) = post(create_router_for_test(), "/shifts/calculate", shift).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_FIELD");
    assert!(error["message"].as_str().unwrap().contains("shift_start"));
}

// =============================================================================
// SECTION 3: Tolerant Shift Recalculation
// =============================================================================

#[tokio::test]
async fn test_recalculate_missing_end_returns_zero() {
    let shift = json!({
        "machine_id": "lasting",
        "shift_start": "2026-01-15T09:00"
    });

    let (status, result) = post(create_router_for_test(), "/shifts/recalculate", shift).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "carbon_emission_kg", "0");
    assert_eq!(rule_ids(&result), vec!["missing_shift_fields"]);
}

#[tokio::test]
async fn test_recalculate_sunday_is_computed() {
    let (status, result) = post(
        create_router_for_test(),
        "/shifts/recalculate",
        create_shift("finishing_packaging", "2026-01-18", "09:00", "11:00"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "carbon_emission_kg", "10");
}

#[tokio::test]
async fn test_recalculate_matches_strict_for_valid_shift() {
    let shift = with_lunch(
        create_shift("sole_molding", "2026-01-15", "09:00", "17:00"),
        "2026-01-15",
        "12:00",
        "13:00",
    );

    let (_, strict) = post(create_router_for_test(), "/shifts/calculate", shift.clone()).await;
    let (_, tolerant) = post(create_router_for_test(), "/shifts/recalculate", shift).await;

    assert_eq!(strict["result"], tolerant["result"]);
}

// =============================================================================
// SECTION 4: Material Emissions
// =============================================================================

#[tokio::test]
async fn test_materials_product_total() {
    let product = json!({
        "product": "Trail Runner",
        "raw_materials": [
            { "material_name": "rubber", "quantity": "120", "carbon_emission_per_unit": "2.5" },
            { "material_name": "mesh", "quantity": "300", "carbon_emission_per_unit": "0.4" }
        ]
    });

    let (status, result) = post(create_router_for_test(), "/materials/calculate", product).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&result, "total_carbon_emission", "420");
    assert_eq!(result["result"]["raw_materials"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_materials_negative_quantity_rejected() {
    let product = json!({
        "product": "Trail Runner",
        "raw_materials": [
            { "material_name": "rubber", "quantity": "-1", "carbon_emission_per_unit": "2.5" }
        ]
    });

    let (status, error) = post(create_router_for_test(), "/materials/calculate", product).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 5: Factor Tables
// =============================================================================

#[tokio::test]
async fn test_factors_lists_active_tables() {
    let (status, factors) = get(create_router_for_test(), "/factors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        normalize_decimal(factors["vehicles"]["car"]["petrol"].as_str().unwrap()),
        "0.192"
    );
    assert_eq!(
        normalize_decimal(factors["machines"]["sole_molding"].as_str().unwrap()),
        "20"
    );
}

#[tokio::test]
async fn test_vehicle_fuels_for_truck() {
    let (status, body) = get(create_router_for_test(), "/factors/vehicles/truck/fuels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed_fuels"], json!(["diesel", "cng"]));
    assert_eq!(body["default_fuel"], "diesel");
}

// =============================================================================
// SECTION 6: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();

    let request = Request::builder()
        .method("POST")
        .uri("/shifts/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from("{invalid json"))
        .unwrap();
    let (status, error) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_unknown_vehicle_type() {
    let (status, error) = post(
        create_router_for_test(),
        "/trips/calculate",
        create_trip("tram", "electric", "10"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_fuel_not_allowed_for_vehicle() {
    let (status, error) = post(
        create_router_for_test(),
        "/trips/calculate",
        create_trip("truck", "petrol", "10"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_FUEL_FOR_VEHICLE");
}

#[tokio::test]
async fn test_error_zero_passengers() {
    let mut trip = create_trip("car", "petrol", "10");
    trip["passenger_count"] = json!(0);

    let (status, error) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_missing_content_type() {
    let router = create_router_for_test();

    let request = Request::builder()
        .method("POST")
        .uri("/trips/calculate")
        .body(Body::from(create_trip("car", "petrol", "10").to_string()))
        .unwrap();
    let (status, error) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_error_trip_too_large_to_compute() {
    let mut trip = create_trip("bus", "diesel", "10000000000000000000000000");
    trip["passenger_count"] = json!(1_000_000);
    trip["traffic_condition"] = json!("heavy");
    trip["vehicle_age_years"] = json!(10);

    let (status, error) = post(create_router_for_test(), "/trips/calculate", trip).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("passenger_count"));
}

#[tokio::test]
async fn test_error_material_too_large_to_compute() {
    let product = json!({
        "product": "Trail Runner",
        "raw_materials": [
            {
                "material_name": "rubber",
                "quantity": "100000000000000000000",
                "carbon_emission_per_unit": "100000000000000000000"
            }
        ]
    });

    let (status, error) = post(create_router_for_test(), "/materials/calculate", product).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}
