//! Machine running time.
//!
//! Running time is the shift span less the lunch break, measured to the
//! millisecond and expressed in hours.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::AuditStep;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Returns the signed number of hours from `start` to `end`.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::hours_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-01-15 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(hours_between(start, end), Decimal::new(15, 1));
/// assert_eq!(hours_between(end, start), Decimal::new(-15, 1));
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    Decimal::from((end - start).num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
}

/// The result of the running time calculation.
#[derive(Debug, Clone)]
pub struct RunningHoursResult {
    /// Running hours. Negative when a lunch break is longer than the shift.
    pub running_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates machine running hours for a shift.
///
/// The lunch break is subtracted as given. The result is not clamped, so
/// an unvalidated break longer than the shift yields negative hours.
pub fn calculate_running_hours(
    shift_start: NaiveDateTime,
    shift_end: NaiveDateTime,
    lunch_break: Option<(NaiveDateTime, NaiveDateTime)>,
    step_number: u32,
) -> RunningHoursResult {
    let shift_hours = hours_between(shift_start, shift_end);
    let lunch_hours = lunch_break
        .map(|(lunch_start, lunch_end)| hours_between(lunch_start, lunch_end))
        .unwrap_or(Decimal::ZERO);
    let running_hours = shift_hours - lunch_hours;

    let audit_step = AuditStep {
        step_number,
        rule_id: "running_hours".to_string(),
        rule_name: "Machine Running Hours".to_string(),
        input: serde_json::json!({
            "shift_start": shift_start.to_string(),
            "shift_end": shift_end.to_string(),
            "lunch_break": lunch_break.map(|(s, e)| serde_json::json!({
                "start": s.to_string(),
                "end": e.to_string()
            }))
        }),
        output: serde_json::json!({
            "shift_hours": shift_hours.normalize().to_string(),
            "lunch_hours": lunch_hours.normalize().to_string(),
            "running_hours": running_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{}h shift - {}h lunch = {}h running",
            shift_hours.normalize(),
            lunch_hours.normalize(),
            running_hours.normalize()
        ),
    };

    RunningHoursResult {
        running_hours,
        audit_step,
    }
}
