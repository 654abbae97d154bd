//! Trip emission calculation.
//!
//! This module combines the base rate, traffic and age rules into the total
//! and per-passenger emission for a single trip. No rounding is applied;
//! presentation layers round as they see fit.

use rust_decimal::Decimal;

use crate::config::FactorTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TripInput, TripResult};

use super::age_penalty::apply_age_penalty;
use super::base_rate::{calculate_base_emission, get_base_rate};
use super::traffic_addition::calculate_traffic_addition;

/// Checks the numeric ranges of a trip input.
///
/// # Errors
///
/// Returns `InvalidInput` if the distance or travel time is negative, or the
/// passenger count is zero.
pub fn validate_trip_input(input: &TripInput) -> EngineResult<()> {
    if input.distance_km < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "distance_km".to_string(),
            message: format!("must not be negative (got {})", input.distance_km),
        });
    }

    if input.passenger_count == 0 {
        return Err(EngineError::InvalidInput {
            field: "passenger_count".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if let Some(minutes) = input.travel_time_minutes {
        if minutes < Decimal::ZERO {
            return Err(EngineError::InvalidInput {
                field: "travel_time_minutes".to_string(),
                message: format!("must not be negative (got {})", minutes),
            });
        }
    }

    Ok(())
}

/// Computes the emission for a trip.
///
/// The steps are, in order:
/// 1. look up the vehicle/fuel rate (kg per km, per passenger-km for buses)
/// 2. base emission = distance x rate, x passengers for buses
/// 3. add distance x traffic addition
/// 4. multiply by `1 + age x 0.005`
/// 5. divide by the passenger count for the per-passenger figure
///
/// For electric trips the grid energy implied by the emission is also
/// reported.
///
/// # Errors
///
/// - `InvalidInput` for a negative distance or zero passengers, or when a
///   value is too large for any step to be computed.
/// - `InvalidFuelForVehicle` when the fuel is not permitted for the vehicle.
/// - `InvalidConfiguration` when the tables lack a needed row.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::compute_trip_emission;
/// use emission_engine::config::FactorTables;
/// use emission_engine::models::{FuelClass, TrafficCondition, TripInput, VehicleClass};
/// use rust_decimal::Decimal;
///
/// let trip = TripInput {
///     vehicle_class: VehicleClass::Car,
///     fuel_class: FuelClass::Petrol,
///     distance_km: Decimal::new(100, 0),
///     traffic_condition: TrafficCondition::Heavy,
///     vehicle_age_years: 0,
///     passenger_count: 1,
///     travel_time_minutes: None,
/// };
///
/// let result = compute_trip_emission(&trip, FactorTables::builtin()).unwrap();
/// assert_eq!(result.total_emission_kg, Decimal::new(242, 1)); // 24.2 kg
/// ```
pub fn compute_trip_emission(input: &TripInput, tables: &FactorTables) -> EngineResult<TripResult> {
    validate_trip_input(input)?;

    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(5);

    let base_rate = get_base_rate(input.vehicle_class, input.fuel_class, tables, 1)?;
    audit_steps.push(base_rate.audit_step);

    let base = calculate_base_emission(
        input.distance_km,
        base_rate.rate,
        input.vehicle_class,
        input.passenger_count,
        2,
    )?;
    audit_steps.push(base.audit_step);

    let traffic = calculate_traffic_addition(input.distance_km, input.traffic_condition, tables, 3)?;
    audit_steps.push(traffic.audit_step);

    let raw_total = base
        .base_emission
        .checked_add(traffic.traffic_extra)
        .ok_or_else(|| EngineError::overflow("distance_km"))?;
    let aged = apply_age_penalty(raw_total, input.vehicle_age_years, tables, 4)?;
    audit_steps.push(aged.audit_step);

    let total_emission_kg = aged.total_emission;
    let per_passenger_emission_kg = total_emission_kg / Decimal::from(input.passenger_count);
    audit_steps.push(AuditStep {
        step_number: 5,
        rule_id: "per_passenger_share".to_string(),
        rule_name: "Per-Passenger Share".to_string(),
        input: serde_json::json!({
            "total_emission_kg": total_emission_kg.normalize().to_string(),
            "passenger_count": input.passenger_count
        }),
        output: serde_json::json!({
            "per_passenger_emission_kg": per_passenger_emission_kg.normalize().to_string()
        }),
        reasoning: format!(
            "{} kg / {} passengers = {} kg",
            total_emission_kg.normalize(),
            input.passenger_count,
            per_passenger_emission_kg.normalize()
        ),
    });

    let estimated_energy_kwh = if input.is_electric() {
        let kwh = total_emission_kg
            .checked_div(tables.grid_emission_factor())
            .ok_or_else(|| EngineError::overflow("distance_km"))?;
        Some(kwh)
    } else {
        None
    };

    Ok(TripResult {
        total_emission_kg,
        per_passenger_emission_kg,
        estimated_energy_kwh,
        travel_time_minutes: input.travel_time_minutes,
        audit_steps,
    })
}
