//! Calculation result models for the Emission Computation Engine.
//!
//! This module contains the [`AuditStep`] type recorded by every calculation
//! rule, and the [`CalculationRecord`] envelope returned by the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use emission_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "age_penalty".to_string(),
///     rule_name: "Vehicle Age Penalty".to_string(),
///     input: serde_json::json!({ "vehicle_age_years": 4 }),
///     output: serde_json::json!({ "age_multiplier": "1.02" }),
///     reasoning: "1 + 4 x 0.005 = 1.02".to_string(),
/// };
/// assert_eq!(step.rule_id, "age_penalty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A calculation result stamped with identifying metadata.
///
/// The engine's calculators return plain results; the API layer wraps them
/// in this envelope before serializing, so the results themselves stay
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Wall-clock time spent calculating, in microseconds.
    pub duration_us: u64,
    /// The calculation result.
    pub result: T,
}

impl<T> CalculationRecord<T> {
    /// Wraps a result with a fresh id and the current time.
    pub fn new(result: T, duration_us: u64) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            result,
        }
    }
}
