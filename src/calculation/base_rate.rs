//! Vehicle base rate lookup and base emission.
//!
//! This module resolves the per-km emission factor for a vehicle and fuel
//! and applies it to the trip distance.

use rust_decimal::Decimal;

use crate::config::FactorTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, FuelClass, VehicleClass};

/// The result of a base rate lookup, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct BaseRateLookupResult {
    /// kg CO2 per km (per passenger-km for buses).
    pub rate: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the emission factor for a vehicle and fuel.
///
/// # Errors
///
/// - `InvalidFuelForVehicle` when the fuel is not permitted for the vehicle.
/// - `InvalidConfiguration` when the tables have no row for the vehicle.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::get_base_rate;
/// use emission_engine::config::FactorTables;
/// use emission_engine::models::{FuelClass, VehicleClass};
/// use rust_decimal::Decimal;
///
/// let result = get_base_rate(VehicleClass::Truck, FuelClass::Cng, FactorTables::builtin(), 1).unwrap();
/// assert_eq!(result.rate, Decimal::new(750, 3));
/// ```
pub fn get_base_rate(
    vehicle: VehicleClass,
    fuel: FuelClass,
    tables: &FactorTables,
    step_number: u32,
) -> EngineResult<BaseRateLookupResult> {
    let rate = tables.vehicle_fuel_rate(vehicle, fuel)?;
    let unit = if vehicle == VehicleClass::Bus {
        "kg CO2 per passenger-km"
    } else {
        "kg CO2 per km"
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_rate_lookup".to_string(),
        rule_name: "Vehicle Emission Factor Lookup".to_string(),
        input: serde_json::json!({
            "vehicle_class": vehicle.as_str(),
            "fuel_class": fuel.as_str()
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "unit": unit
        }),
        reasoning: format!("{} on {}: {} {}", vehicle, fuel, rate.normalize(), unit),
    };

    Ok(BaseRateLookupResult { rate, audit_step })
}

/// The result of applying the base rate to a distance.
#[derive(Debug, Clone)]
pub struct BaseEmissionResult {
    /// Emission before traffic and age adjustments, in kg CO2.
    pub base_emission: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the base rate to the trip distance.
///
/// Bus rates are per passenger-km, so a bus's emission is additionally
/// multiplied by the passenger count; the vehicle total rises with occupancy.
///
/// # Errors
///
/// Returns `InvalidInput` naming `distance_km` or `passenger_count` when the
/// product overflows.
pub fn calculate_base_emission(
    distance_km: Decimal,
    rate: Decimal,
    vehicle: VehicleClass,
    passenger_count: u32,
    step_number: u32,
) -> EngineResult<BaseEmissionResult> {
    let per_passenger_km = vehicle == VehicleClass::Bus;
    let per_vehicle = distance_km
        .checked_mul(rate)
        .ok_or_else(|| EngineError::overflow("distance_km"))?;
    let base_emission = if per_passenger_km {
        per_vehicle
            .checked_mul(Decimal::from(passenger_count))
            .ok_or_else(|| EngineError::overflow("passenger_count"))?
    } else {
        per_vehicle
    };

    let reasoning = if per_passenger_km {
        format!(
            "{} km x {} x {} passengers = {} kg",
            distance_km.normalize(),
            rate.normalize(),
            passenger_count,
            base_emission.normalize()
        )
    } else {
        format!(
            "{} km x {} = {} kg",
            distance_km.normalize(),
            rate.normalize(),
            base_emission.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_emission".to_string(),
        rule_name: "Base Emission".to_string(),
        input: serde_json::json!({
            "distance_km": distance_km.normalize().to_string(),
            "rate": rate.normalize().to_string(),
            "passenger_count": passenger_count,
            "per_passenger_km": per_passenger_km
        }),
        output: serde_json::json!({
            "base_emission_kg": base_emission.normalize().to_string()
        }),
        reasoning,
    };

    Ok(BaseEmissionResult {
        base_emission,
        audit_step,
    })
}
