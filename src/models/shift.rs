//! Machine shift model and related types.
//!
//! This module defines the [`ShiftInput`] and [`ShiftResult`] value objects
//! for machine operation shifts, along with the known machine classes.

use std::fmt;

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// The known classes of factory machine.
///
/// Shift inputs carry a free-form machine identifier; identifiers outside
/// this set are accepted and emit at a rate of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineClass {
    /// Upper cutting and stitching.
    CuttingStitching,
    /// Sole moulding presses.
    SoleMolding,
    /// Lasting machines.
    Lasting,
    /// Adhesive drying ovens.
    AdhesiveDrying,
    /// Finishing and packaging line.
    FinishingPackaging,
    /// Shoe box and label printing.
    ShoeBoxesLabels,
}

impl MachineClass {
    /// All machine classes, in declaration order.
    pub const ALL: [MachineClass; 6] = [
        MachineClass::CuttingStitching,
        MachineClass::SoleMolding,
        MachineClass::Lasting,
        MachineClass::AdhesiveDrying,
        MachineClass::FinishingPackaging,
        MachineClass::ShoeBoxesLabels,
    ];

    /// Returns the machine identifier used in shift logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineClass::CuttingStitching => "cutting_stitching",
            MachineClass::SoleMolding => "sole_molding",
            MachineClass::Lasting => "lasting",
            MachineClass::AdhesiveDrying => "adhesive_drying",
            MachineClass::FinishingPackaging => "finishing_packaging",
            MachineClass::ShoeBoxesLabels => "shoe_boxes_labels",
        }
    }
}

impl fmt::Display for MachineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw timestamps of a machine shift, as logged by an operator.
///
/// Every field is optional because shift logs arrive from forms that may be
/// incomplete. The strict calculator rejects missing fields; the tolerant
/// one treats them as "no emission".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// Machine identifier, matched case-insensitively against the rate table.
    #[serde(default)]
    pub machine_id: Option<String>,
    /// Start of the shift.
    #[serde(default)]
    pub shift_start: Option<NaiveDateTime>,
    /// End of the shift.
    #[serde(default)]
    pub shift_end: Option<NaiveDateTime>,
    /// Start of the lunch break.
    #[serde(default)]
    pub lunch_break_start: Option<NaiveDateTime>,
    /// End of the lunch break.
    #[serde(default)]
    pub lunch_break_end: Option<NaiveDateTime>,
}

impl ShiftInput {
    /// Returns the lunch break when both of its bounds are present.
    pub fn lunch_break(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.lunch_break_start.zip(self.lunch_break_end)
    }
}

/// Parses a shift timestamp as sent by browser forms and API clients.
///
/// Timestamps with an offset are reduced to their wall-clock time as
/// written; the offset is dropped, not converted into the server's timezone.
/// Rest days are therefore judged on the sender's local calendar day:
/// `2026-01-18T23:30:00-08:00` is a Sunday here, although the same instant
/// is Monday morning on a UTC server. Returns `None` for blank or
/// unparseable input.
///
/// # Example
///
/// ```
/// use emission_engine::models::parse_timestamp;
///
/// let form = parse_timestamp("2026-01-15T09:00").unwrap();
/// let rfc = parse_timestamp("2026-01-15T09:00:00+05:30").unwrap();
/// assert_eq!(form, rfc);
/// assert!(parse_timestamp("not a time").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// The outcome of a shift emission calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftResult {
    /// Emission for the shift in kg CO2.
    pub carbon_emission_kg: Decimal,
    /// Machine running time in hours (shift span minus lunch break).
    pub running_hours: Decimal,
    /// The hourly emission rate applied.
    pub emission_rate: Decimal,
    /// Each rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
}

impl ShiftResult {
    /// A result recording no emission, with the reason as its only step.
    pub fn zero(audit_step: AuditStep) -> Self {
        Self {
            carbon_emission_kg: Decimal::ZERO,
            running_hours: Decimal::ZERO,
            emission_rate: Decimal::ZERO,
            audit_steps: vec![audit_step],
        }
    }
}
