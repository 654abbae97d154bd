//! Calculation logic for the Emission Computation Engine.
//!
//! This module contains the trip calculator (base rate lookup, traffic
//! addition, age penalty), the shift interval validator, the shift
//! calculator with its strict and tolerant entry points, and the inventory
//! material calculator. Every function is pure over its inputs and the
//! factor tables.

mod age_penalty;
mod base_rate;
mod interval_validation;
mod material_emission;
mod running_hours;
mod shift_emission;
mod traffic_addition;
mod trip_emission;

pub use age_penalty::{AgePenaltyResult, age_multiplier, apply_age_penalty};
pub use base_rate::{
    BaseEmissionResult, BaseRateLookupResult, calculate_base_emission, get_base_rate,
};
pub use interval_validation::{ValidatedShift, validate_shift_interval};
pub use material_emission::{calculate_material_emission, calculate_product_emission};
pub use running_hours::{RunningHoursResult, calculate_running_hours, hours_between};
pub use shift_emission::{compute_shift_emission, compute_shift_emission_or_zero};
pub use traffic_addition::{TrafficAdditionResult, calculate_traffic_addition};
pub use trip_emission::{compute_trip_emission, validate_trip_input};
