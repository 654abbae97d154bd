//! Vehicle age penalty.
//!
//! Older vehicles emit more: the raw trip emission is multiplied by
//! `1 + age x rate`, where the rate is 0.5% per year by default.

use rust_decimal::Decimal;

use crate::config::FactorTables;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Returns the multiplier for a vehicle of the given age.
///
/// # Errors
///
/// Returns `InvalidInput` for `vehicle_age_years` if the multiplier overflows.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::age_multiplier;
/// use rust_decimal::Decimal;
///
/// // 10 years at 0.5% per year
/// assert_eq!(age_multiplier(10, Decimal::new(5, 3)).unwrap(), Decimal::new(105, 2));
/// ```
pub fn age_multiplier(vehicle_age_years: u32, penalty_per_year: Decimal) -> EngineResult<Decimal> {
    Decimal::from(vehicle_age_years)
        .checked_mul(penalty_per_year)
        .and_then(|penalty| Decimal::ONE.checked_add(penalty))
        .ok_or_else(|| EngineError::overflow("vehicle_age_years"))
}

/// The result of applying the age penalty.
#[derive(Debug, Clone)]
pub struct AgePenaltyResult {
    /// The emission after the penalty, in kg CO2.
    pub total_emission: Decimal,
    /// The multiplier that was applied.
    pub multiplier: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the age penalty to the combined base and traffic emission.
///
/// # Errors
///
/// Returns `InvalidInput` for `distance_km` if the penalised total overflows.
pub fn apply_age_penalty(
    raw_total: Decimal,
    vehicle_age_years: u32,
    tables: &FactorTables,
    step_number: u32,
) -> EngineResult<AgePenaltyResult> {
    let per_year = tables.age_penalty_per_year();
    let multiplier = age_multiplier(vehicle_age_years, per_year)?;
    let total_emission = raw_total
        .checked_mul(multiplier)
        .ok_or_else(|| EngineError::overflow("distance_km"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "age_penalty".to_string(),
        rule_name: "Vehicle Age Penalty".to_string(),
        input: serde_json::json!({
            "raw_total_kg": raw_total.normalize().to_string(),
            "vehicle_age_years": vehicle_age_years,
            "penalty_per_year": per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "age_multiplier": multiplier.normalize().to_string(),
            "total_emission_kg": total_emission.normalize().to_string()
        }),
        reasoning: format!(
            "{} kg x (1 + {} x {}) = {} kg",
            raw_total.normalize(),
            vehicle_age_years,
            per_year.normalize(),
            total_emission.normalize()
        ),
    };

    Ok(AgePenaltyResult {
        total_emission,
        multiplier,
        audit_step,
    })
}
