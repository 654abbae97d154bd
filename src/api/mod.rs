//! HTTP API module for the Emission Computation Engine.
//!
//! This module provides the REST API endpoints for trip, shift and material
//! emission calculations, and read access to the active factor tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ShiftRequest, TripRequest};
pub use response::{ApiError, ApiErrorResponse, VehicleFuelsResponse};
pub use state::AppState;
