//! Request types for the Emission Computation Engine API.
//!
//! This module defines the JSON request structures for the calculation
//! endpoints and their conversion into engine inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FuelClass, ShiftInput, TrafficCondition, TripInput, VehicleClass, parse_timestamp};

/// Request body for the `/trips/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// The class of vehicle (e.g., "car").
    pub vehicle_type: VehicleClass,
    /// The fuel (e.g., "petrol").
    pub fuel_type: FuelClass,
    /// Route distance in kilometres.
    pub distance_km: Decimal,
    /// Traffic condition, defaults to light.
    #[serde(default)]
    pub traffic_condition: TrafficCondition,
    /// Vehicle age in years, defaults to 0.
    #[serde(default)]
    pub vehicle_age_years: u32,
    /// Number of passengers, defaults to 1.
    #[serde(default = "crate::models::default_passenger_count")]
    pub passenger_count: u32,
    /// Route duration in minutes.
    #[serde(default)]
    pub travel_time_minutes: Option<Decimal>,
}

/// Request body for the `/shifts/calculate` and `/shifts/recalculate` endpoints.
///
/// Timestamps are accepted as strings so that blank or malformed values
/// reach the engine as missing rather than failing JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Machine identifier (e.g., "sole_molding").
    #[serde(default)]
    pub machine_id: Option<String>,
    /// Start of the shift.
    #[serde(default)]
    pub shift_start: Option<String>,
    /// Start of the lunch break.
    #[serde(default)]
    pub lunch_break_start: Option<String>,
    /// End of the lunch break.
    #[serde(default)]
    pub lunch_break_end: Option<String>,
    /// End of the shift.
    #[serde(default)]
    pub shift_end: Option<String>,
}

impl From<TripRequest> for TripInput {
    fn from(req: TripRequest) -> Self {
        TripInput {
            vehicle_class: req.vehicle_type,
            fuel_class: req.fuel_type,
            distance_km: req.distance_km,
            traffic_condition: req.traffic_condition,
            vehicle_age_years: req.vehicle_age_years,
            passenger_count: req.passenger_count,
            travel_time_minutes: req.travel_time_minutes,
        }
    }
}

impl From<ShiftRequest> for ShiftInput {
    fn from(req: ShiftRequest) -> Self {
        let parse = |raw: Option<String>| raw.as_deref().and_then(parse_timestamp);
        ShiftInput {
            machine_id: req.machine_id,
            shift_start: parse(req.shift_start),
            shift_end: parse(req.shift_end),
            lunch_break_start: parse(req.lunch_break_start),
            lunch_break_end: parse(req.lunch_break_end),
        }
    }
}
