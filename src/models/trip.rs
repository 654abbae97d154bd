//! Trip model and related types.
//!
//! This module defines the vehicle, fuel and traffic classifications and the
//! [`TripInput`] / [`TripResult`] value objects used by the trip calculator.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;
use crate::error::EngineError;

/// The class of vehicle used for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Private car.
    Car,
    /// Bus. Emission rates are per passenger-km.
    Bus,
    /// Goods truck.
    Truck,
    /// Motorbike.
    Bike,
    /// Scooter.
    Scooter,
}

impl VehicleClass {
    /// All vehicle classes, in declaration order.
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Car,
        VehicleClass::Bus,
        VehicleClass::Truck,
        VehicleClass::Bike,
        VehicleClass::Scooter,
    ];

    /// Returns the identifier used in configuration files and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Bus => "bus",
            VehicleClass::Truck => "truck",
            VehicleClass::Bike => "bike",
            VehicleClass::Scooter => "scooter",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleClass::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidConfiguration {
                message: format!("unknown vehicle class '{}'", s),
            })
    }
}

/// The fuel a vehicle runs on.
///
/// The declaration order is significant: the first fuel of a vehicle's
/// rate row in this order is that vehicle's default fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelClass {
    /// Petrol (gasoline).
    Petrol,
    /// Diesel.
    Diesel,
    /// Battery electric.
    Electric,
    /// Petrol-electric hybrid.
    Hybrid,
    /// Compressed natural gas.
    Cng,
}

impl FuelClass {
    /// All fuel classes, in declaration order.
    pub const ALL: [FuelClass; 5] = [
        FuelClass::Petrol,
        FuelClass::Diesel,
        FuelClass::Electric,
        FuelClass::Hybrid,
        FuelClass::Cng,
    ];

    /// Returns the identifier used in configuration files and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelClass::Petrol => "petrol",
            FuelClass::Diesel => "diesel",
            FuelClass::Electric => "electric",
            FuelClass::Hybrid => "hybrid",
            FuelClass::Cng => "cng",
        }
    }
}

impl fmt::Display for FuelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelClass::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidConfiguration {
                message: format!("unknown fuel class '{}'", s),
            })
    }
}

/// Road traffic condition during a trip.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TrafficCondition {
    /// Free-flowing traffic. No addition.
    #[default]
    Light,
    /// Moderate congestion.
    Moderate,
    /// Heavy congestion.
    Heavy,
}

impl TrafficCondition {
    /// All traffic conditions, in declaration order.
    pub const ALL: [TrafficCondition; 3] = [
        TrafficCondition::Light,
        TrafficCondition::Moderate,
        TrafficCondition::Heavy,
    ];

    /// Returns the identifier used in configuration files and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficCondition::Light => "light",
            TrafficCondition::Moderate => "moderate",
            TrafficCondition::Heavy => "heavy",
        }
    }
}

impl fmt::Display for TrafficCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The inputs describing a single completed trip.
///
/// # Example
///
/// ```
/// use emission_engine::models::{FuelClass, TrafficCondition, TripInput, VehicleClass};
/// use rust_decimal::Decimal;
///
/// let trip = TripInput {
///     vehicle_class: VehicleClass::Car,
///     fuel_class: FuelClass::Petrol,
///     distance_km: Decimal::new(100, 0),
///     traffic_condition: TrafficCondition::Light,
///     vehicle_age_years: 0,
///     passenger_count: 1,
///     travel_time_minutes: None,
/// };
/// assert!(!trip.is_electric());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripInput {
    /// The class of vehicle.
    pub vehicle_class: VehicleClass,
    /// The fuel the vehicle runs on. Must be allowed for the vehicle class.
    pub fuel_class: FuelClass,
    /// Route distance in kilometres.
    pub distance_km: Decimal,
    /// Traffic condition during the trip.
    #[serde(default)]
    pub traffic_condition: TrafficCondition,
    /// Age of the vehicle in whole years.
    #[serde(default)]
    pub vehicle_age_years: u32,
    /// Number of passengers. Scales bus emissions.
    #[serde(default = "default_passenger_count")]
    pub passenger_count: u32,
    /// Route duration in minutes, carried through for storage.
    #[serde(default)]
    pub travel_time_minutes: Option<Decimal>,
}

/// Passenger count used when a trip omits one.
pub(crate) fn default_passenger_count() -> u32 {
    1
}

impl TripInput {
    /// Returns true when the trip is made on electric power.
    pub fn is_electric(&self) -> bool {
        self.fuel_class == FuelClass::Electric
    }
}

/// The outcome of a trip emission calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripResult {
    /// Total emission for the trip in kg CO2.
    pub total_emission_kg: Decimal,
    /// Total emission divided by the passenger count.
    pub per_passenger_emission_kg: Decimal,
    /// Grid energy implied by the emission, for electric trips only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_energy_kwh: Option<Decimal>,
    /// Route duration in minutes, echoed from the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time_minutes: Option<Decimal>,
    /// Each rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
}
