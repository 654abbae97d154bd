//! Machine shift emission calculation.
//!
//! Two entry points share one calculation:
//!
//! - [`compute_shift_emission`] validates the shift first and fails fast.
//! - [`compute_shift_emission_or_zero`] is the tolerant path used by update
//!   flows: a missing machine, start or end yields a zero result, and the
//!   interval is used as given without validation.
//!
//! Machines absent from the rate table emit at a rate of zero on both paths.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::FactorTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ShiftInput, ShiftResult};

use super::interval_validation::validate_shift_interval;
use super::running_hours::calculate_running_hours;

/// Computes the emission for a validated shift.
///
/// The shift is checked with [`validate_shift_interval`] against the rest
/// days of the factor tables' policy, then a machine identifier is required.
///
/// # Errors
///
/// `MissingField`, `RestDayNotAllowed`, `EndBeforeStart` or
/// `InvalidLunchBreak` from validation; `MissingField` for a missing or
/// blank `machine_id`.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::compute_shift_emission;
/// use emission_engine::config::FactorTables;
/// use emission_engine::models::{ShiftInput, parse_timestamp};
/// use rust_decimal::Decimal;
///
/// let shift = ShiftInput {
///     machine_id: Some("sole_molding".to_string()),
///     shift_start: parse_timestamp("2026-01-15T09:00"),
///     shift_end: parse_timestamp("2026-01-15T17:00"),
///     lunch_break_start: parse_timestamp("2026-01-15T12:00"),
///     lunch_break_end: parse_timestamp("2026-01-15T13:00"),
/// };
///
/// let result = compute_shift_emission(&shift, FactorTables::builtin()).unwrap();
/// assert_eq!(result.carbon_emission_kg, Decimal::new(140, 0));
/// ```
pub fn compute_shift_emission(
    input: &ShiftInput,
    tables: &FactorTables,
) -> EngineResult<ShiftResult> {
    let validated = validate_shift_interval(input, tables.policy())?;
    let machine_id = machine_id(input).ok_or_else(|| EngineError::MissingField {
        field: "machine_id".to_string(),
    })?;

    Ok(emission_for_interval(
        machine_id,
        validated.shift_start,
        validated.shift_end,
        validated.lunch_break,
        tables,
    ))
}

/// Computes the emission for a shift, degrading to zero on missing fields.
///
/// No validation is applied: a rest-day or inverted shift is computed as
/// given, and a lunch break longer than the shift is not clamped.
pub fn compute_shift_emission_or_zero(input: &ShiftInput, tables: &FactorTables) -> ShiftResult {
    let (Some(machine_id), Some(shift_start), Some(shift_end)) =
        (machine_id(input), input.shift_start, input.shift_end)
    else {
        let missing: Vec<&str> = [
            ("machine_id", machine_id(input).is_none()),
            ("shift_start", input.shift_start.is_none()),
            ("shift_end", input.shift_end.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        return ShiftResult::zero(AuditStep {
            step_number: 1,
            rule_id: "missing_shift_fields".to_string(),
            rule_name: "Missing Shift Fields".to_string(),
            input: serde_json::json!({ "missing_fields": missing }),
            output: serde_json::json!({ "carbon_emission_kg": "0" }),
            reasoning: format!("No emission recorded: missing {}", missing.join(", ")),
        });
    };

    emission_for_interval(
        machine_id,
        shift_start,
        shift_end,
        input.lunch_break(),
        tables,
    )
}

fn machine_id(input: &ShiftInput) -> Option<&str> {
    input
        .machine_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn emission_for_interval(
    machine_id: &str,
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
    lunch_break: Option<(NaiveDateTime, NaiveDateTime)>,
    tables: &FactorTables,
) -> ShiftResult {
    let running = calculate_running_hours(shift_start, shift_end, lunch_break, 1);
    let emission_rate = tables.machine_rate_or_zero(machine_id);
    let carbon_emission_kg = running.running_hours * emission_rate;

    let known_machine = tables.machine_rate(machine_id).is_ok();
    let emission_step = AuditStep {
        step_number: 2,
        rule_id: "machine_emission".to_string(),
        rule_name: "Machine Emission".to_string(),
        input: serde_json::json!({
            "machine_id": machine_id,
            "known_machine": known_machine,
            "running_hours": running.running_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "emission_rate": emission_rate.normalize().to_string(),
            "carbon_emission_kg": carbon_emission_kg.normalize().to_string()
        }),
        reasoning: if known_machine {
            format!(
                "{}h x {} kg/h = {} kg",
                running.running_hours.normalize(),
                emission_rate.normalize(),
                carbon_emission_kg.normalize()
            )
        } else {
            format!("Unknown machine '{}' emits at 0 kg/h", machine_id)
        },
    };

    ShiftResult {
        carbon_emission_kg,
        running_hours: running.running_hours,
        emission_rate,
        audit_steps: vec![running.audit_step, emission_step],
    }
}
