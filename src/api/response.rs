//! Response types for the Emission Computation Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP statuses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{FuelClass, VehicleClass};

/// Response body for `GET /factors/vehicles/:vehicle/fuels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleFuelsResponse {
    /// The vehicle class that was queried.
    pub vehicle: VehicleClass,
    /// Fuels with a configured rate for this vehicle.
    pub allowed_fuels: Vec<FuelClass>,
    /// The fuel preselected for this vehicle.
    pub default_fuel: FuelClass,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            EngineError::InvalidConfiguration { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_CONFIGURATION",
                    message,
                    "The requested key is not present in the emission factor tables",
                ),
            ),
            EngineError::InvalidFuelForVehicle { vehicle, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_FUEL_FOR_VEHICLE",
                    message,
                    format!("See /factors/vehicles/{}/fuels for permitted fuels", vehicle),
                ),
            ),
            EngineError::InvalidInput { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
            EngineError::MissingField { field } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_FIELD",
                    message,
                    format!("Required field '{}' was missing or unparseable", field),
                ),
            ),
            EngineError::RestDayNotAllowed { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("REST_DAY_NOT_ALLOWED", message))
            }
            EngineError::EndBeforeStart { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("END_BEFORE_START", message))
            }
            EngineError::InvalidLunchBreak { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_LUNCH_BREAK", message))
            }
        }
    }
}
