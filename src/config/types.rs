//! Configuration file types for the emission factor tables.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a factor configuration directory.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FuelClass, TrafficCondition, VehicleClass};

/// Contents of `vehicles.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleFactorsConfig {
    /// Fractional emission increase per year of vehicle age.
    pub age_penalty_per_year: Decimal,
    /// kg CO2 per kWh of grid electricity.
    pub grid_emission_factor: Decimal,
    /// kg CO2 per km for each permitted vehicle and fuel pair.
    pub vehicles: BTreeMap<VehicleClass, BTreeMap<FuelClass, Decimal>>,
}

/// Contents of `traffic.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficConfig {
    /// Flat kg CO2 per km added for each traffic condition.
    pub traffic: BTreeMap<TrafficCondition, Decimal>,
}

/// Contents of `machines.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MachinesConfig {
    /// kg CO2 per running hour, keyed by machine identifier.
    pub machines: BTreeMap<String, Decimal>,
}

/// Shift logging policy, the contents of `policy.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPolicy {
    /// Days of the week on which shifts may not start.
    pub rest_days: Vec<Weekday>,
}

impl Default for ShiftPolicy {
    fn default() -> Self {
        Self {
            rest_days: vec![Weekday::Sun],
        }
    }
}

impl ShiftPolicy {
    /// Returns true if shifts may not be logged on the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use emission_engine::config::ShiftPolicy;
    /// use chrono::NaiveDate;
    ///
    /// let policy = ShiftPolicy::default();
    /// // 2026-01-18 is a Sunday
    /// assert!(policy.is_rest_day(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
    /// assert!(!policy.is_rest_day(NaiveDate::from_ymd_opt(2026, 1, 17).unwrap()));
    /// ```
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.rest_days.contains(&date.weekday())
    }
}
