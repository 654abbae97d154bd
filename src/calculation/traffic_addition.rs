//! Traffic condition adjustment.
//!
//! Congestion adds a flat amount of CO2 per km on top of the base emission,
//! independent of vehicle and fuel.

use rust_decimal::Decimal;

use crate::config::FactorTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TrafficCondition};

/// The result of the traffic adjustment.
#[derive(Debug, Clone)]
pub struct TrafficAdditionResult {
    /// Extra emission due to traffic, in kg CO2.
    pub traffic_extra: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the extra emission caused by traffic over a distance.
///
/// # Errors
///
/// - `InvalidConfiguration` if the condition has no entry in the tables.
/// - `InvalidInput` for `distance_km` if the product overflows.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::calculate_traffic_addition;
/// use emission_engine::config::FactorTables;
/// use emission_engine::models::TrafficCondition;
/// use rust_decimal::Decimal;
///
/// let result = calculate_traffic_addition(
///     Decimal::new(100, 0),
///     TrafficCondition::Heavy,
///     FactorTables::builtin(),
///     3,
/// ).unwrap();
/// assert_eq!(result.traffic_extra, Decimal::new(5, 0));
/// ```
pub fn calculate_traffic_addition(
    distance_km: Decimal,
    condition: TrafficCondition,
    tables: &FactorTables,
    step_number: u32,
) -> EngineResult<TrafficAdditionResult> {
    let per_km = tables.traffic_addition(condition)?;
    let traffic_extra = distance_km
        .checked_mul(per_km)
        .ok_or_else(|| EngineError::overflow("distance_km"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "traffic_addition".to_string(),
        rule_name: "Traffic Addition".to_string(),
        input: serde_json::json!({
            "distance_km": distance_km.normalize().to_string(),
            "traffic_condition": condition.as_str()
        }),
        output: serde_json::json!({
            "addition_per_km": per_km.normalize().to_string(),
            "traffic_extra_kg": traffic_extra.normalize().to_string()
        }),
        reasoning: format!(
            "{} traffic: {} km x {} = {} kg",
            condition,
            distance_km.normalize(),
            per_km.normalize(),
            traffic_extra.normalize()
        ),
    };

    Ok(TrafficAdditionResult {
        traffic_extra,
        audit_step,
    })
}
