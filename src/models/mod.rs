//! Core data models for the Emission Computation Engine.
//!
//! This module contains the value objects passed into and returned from
//! the calculators. None of them are mutated after construction.

mod calculation_result;
mod material;
mod shift;
mod trip;

pub use calculation_result::{AuditStep, CalculationRecord};
pub use material::{MaterialEmission, Product, ProductEmissionResult, RawMaterial};
pub use shift::{MachineClass, ShiftInput, ShiftResult, parse_timestamp};
pub use trip::{FuelClass, TrafficCondition, TripInput, TripResult, VehicleClass};
pub(crate) use trip::default_passenger_count;
