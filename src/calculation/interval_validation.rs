//! Shift interval validation.
//!
//! Shift logs are checked before a strict emission computation. Rules are
//! evaluated in order and the first failure wins:
//!
//! 1. shift start and end must be present (`MissingField`)
//! 2. the shift must not start on a rest day (`RestDayNotAllowed`)
//! 3. the shift must end strictly after it starts (`EndBeforeStart`)
//! 4. a lunch break must have both bounds, must not end before it starts,
//!    and must lie within the shift (`InvalidLunchBreak`)

use chrono::NaiveDateTime;

use crate::config::ShiftPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftInput;

/// A shift interval that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedShift {
    /// Start of the shift.
    pub shift_start: NaiveDateTime,
    /// End of the shift, strictly after the start.
    pub shift_end: NaiveDateTime,
    /// The lunch break, contained in the shift.
    pub lunch_break: Option<(NaiveDateTime, NaiveDateTime)>,
}

/// Validates the interval of a shift log.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::validate_shift_interval;
/// use emission_engine::config::ShiftPolicy;
/// use emission_engine::error::EngineError;
/// use emission_engine::models::{ShiftInput, parse_timestamp};
///
/// // 2026-01-18 is a Sunday
/// let shift = ShiftInput {
///     machine_id: Some("lasting".to_string()),
///     shift_start: parse_timestamp("2026-01-18T09:00"),
///     shift_end: parse_timestamp("2026-01-18T17:00"),
///     ..Default::default()
/// };
///
/// let result = validate_shift_interval(&shift, &ShiftPolicy::default());
/// assert!(matches!(result, Err(EngineError::RestDayNotAllowed { .. })));
/// ```
pub fn validate_shift_interval(
    input: &ShiftInput,
    policy: &ShiftPolicy,
) -> EngineResult<ValidatedShift> {
    let shift_start = input.shift_start.ok_or_else(|| missing("shift_start"))?;
    let shift_end = input.shift_end.ok_or_else(|| missing("shift_end"))?;

    let start_date = shift_start.date();
    if policy.is_rest_day(start_date) {
        return Err(EngineError::RestDayNotAllowed {
            date: start_date,
            weekday: start_date.format("%A").to_string(),
        });
    }

    if shift_end <= shift_start {
        return Err(EngineError::EndBeforeStart {
            start: shift_start,
            end: shift_end,
        });
    }

    let lunch_break = match (input.lunch_break_start, input.lunch_break_end) {
        (None, None) => None,
        (Some(_), None) => return Err(lunch("lunch_break_end is missing")),
        (None, Some(_)) => return Err(lunch("lunch_break_start is missing")),
        (Some(lunch_start), Some(lunch_end)) => {
            if lunch_end < lunch_start {
                return Err(lunch("lunch break ends before it starts"));
            }
            if lunch_start < shift_start || lunch_end > shift_end {
                return Err(lunch("lunch break lies outside the shift"));
            }
            Some((lunch_start, lunch_end))
        }
    };

    Ok(ValidatedShift {
        shift_start,
        shift_end,
        lunch_break,
    })
}

fn missing(field: &str) -> EngineError {
    EngineError::MissingField {
        field: field.to_string(),
    }
}

fn lunch(message: &str) -> EngineError {
    EngineError::InvalidLunchBreak {
        message: message.to_string(),
    }
}
