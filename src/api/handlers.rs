//! HTTP request handlers for the Emission Computation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::str::FromStr;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_product_emission, compute_shift_emission, compute_shift_emission_or_zero,
    compute_trip_emission,
};
use crate::error::EngineResult;
use crate::models::{CalculationRecord, Product, ShiftInput, TripInput, VehicleClass};

use super::request::{ShiftRequest, TripRequest};
use super::response::{ApiError, ApiErrorResponse, VehicleFuelsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/trips/calculate", post(calculate_trip_handler))
        .route("/shifts/calculate", post(calculate_shift_handler))
        .route("/shifts/recalculate", post(recalculate_shift_handler))
        .route("/materials/calculate", post(calculate_materials_handler))
        .route("/factors", get(factors_handler))
        .route("/factors/vehicles/:vehicle/fuels", get(vehicle_fuels_handler))
        .with_state(state)
}

/// Handler for POST /trips/calculate.
///
/// Computes the emission of a single trip.
async fn calculate_trip_handler(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing trip calculation request");

    let input: TripInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match compute_trip_emission(&input, state.tables()) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                vehicle = %input.vehicle_class,
                fuel = %input.fuel_class,
                distance_km = %input.distance_km,
                total_emission_kg = %result.total_emission_kg,
                duration_us,
                "Trip calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationRecord::new(result, duration_us))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                vehicle = %input.vehicle_class,
                fuel = %input.fuel_class,
                error = %err,
                "Trip calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /shifts/calculate.
///
/// Validates the shift interval and rejects incomplete or invalid shifts.
async fn calculate_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift calculation request");

    let input: ShiftInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match compute_shift_emission(&input, state.tables()) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                machine_id = input.machine_id.as_deref().unwrap_or_default(),
                running_hours = %result.running_hours,
                carbon_emission_kg = %result.carbon_emission_kg,
                duration_us,
                "Shift calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationRecord::new(result, duration_us))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Shift calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /shifts/recalculate.
///
/// Recomputes a stored shift record; missing fields yield a zero result.
async fn recalculate_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift recalculation request");

    let input: ShiftInput = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let result = compute_shift_emission_or_zero(&input, state.tables());
    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        correlation_id = %correlation_id,
        machine_id = input.machine_id.as_deref().unwrap_or_default(),
        running_hours = %result.running_hours,
        carbon_emission_kg = %result.carbon_emission_kg,
        duration_us,
        "Shift recalculation completed"
    );
    json_response(StatusCode::OK, CalculationRecord::new(result, duration_us))
}

/// Handler for POST /materials/calculate.
async fn calculate_materials_handler(
    payload: Result<Json<Product>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing material calculation request");

    let product = match payload {
        Ok(Json(product)) => product,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match calculate_product_emission(&product) {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                product = %result.product,
                materials_count = result.raw_materials.len(),
                total_carbon_emission = %result.total_carbon_emission,
                duration_us,
                "Material calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationRecord::new(result, duration_us))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                product = %product.product,
                error = %err,
                "Material calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /factors.
///
/// Returns the active factor tables.
async fn factors_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.tables())
}

/// Handler for GET /factors/vehicles/:vehicle/fuels.
async fn vehicle_fuels_handler(
    State(state): State<AppState>,
    Path(vehicle): Path<String>,
) -> Response {
    match vehicle_fuels(&state, &vehicle) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            warn!(vehicle = %vehicle, error = %err, "Fuel listing failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn vehicle_fuels(state: &AppState, vehicle: &str) -> EngineResult<VehicleFuelsResponse> {
    let vehicle = VehicleClass::from_str(vehicle)?;
    let tables = state.tables();
    Ok(VehicleFuelsResponse {
        vehicle,
        allowed_fuels: tables.allowed_fuels(vehicle)?,
        default_fuel: tables.default_fuel(vehicle)?,
    })
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the bad field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{ShiftResult, TripResult};
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/factors").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_trip_request_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/trips/calculate",
                r#"{"vehicle_type": "car", "fuel_type": "petrol", "distance_km": "100"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let record: CalculationRecord<TripResult> = read_body(response).await;
        assert_eq!(record.result.total_emission_kg, Decimal::new(192, 1));
        assert_eq!(record.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/trips/calculate", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_distance_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/trips/calculate",
                r#"{"vehicle_type": "car", "fuel_type": "petrol"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("distance_km"),
            "Expected error message to mention distance_km, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_disallowed_fuel_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/trips/calculate",
                r#"{"vehicle_type": "bike", "fuel_type": "diesel", "distance_km": "10"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_FUEL_FOR_VEHICLE");
    }

    #[tokio::test]
    async fn test_strict_shift_missing_end_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/shifts/calculate",
                r#"{"machine_id": "lasting", "shift_start": "2026-01-15T09:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "MISSING_FIELD");
    }

    #[tokio::test]
    async fn test_tolerant_shift_missing_end_returns_zero() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/shifts/recalculate",
                r#"{"machine_id": "lasting", "shift_start": "2026-01-15T09:00"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let record: CalculationRecord<ShiftResult> = read_body(response).await;
        assert_eq!(record.result.carbon_emission_kg, Decimal::ZERO);
        assert_eq!(record.result.running_hours, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_vehicle_fuels_lists_allowed_and_default() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/factors/vehicles/bike/fuels")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: VehicleFuelsResponse = read_body(response).await;
        assert_eq!(body.vehicle, VehicleClass::Bike);
        assert_eq!(body.default_fuel, crate::models::FuelClass::Petrol);
        assert!(!body.allowed_fuels.contains(&crate::models::FuelClass::Diesel));
    }

    #[tokio::test]
    async fn test_unknown_vehicle_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/factors/vehicles/tram/fuels")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_body(response).await;
        assert_eq!(error.code, "INVALID_CONFIGURATION");
    }
}
