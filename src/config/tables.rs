//! The emission factor tables and their lookups.
//!
//! [`FactorTables`] is immutable once built. The compiled-in defaults are
//! available process-wide through [`FactorTables::builtin`]; a table set
//! loaded from disk is shared behind an `Arc` by the HTTP layer.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{FuelClass, MachineClass, TrafficCondition, VehicleClass};

use super::types::{MachinesConfig, ShiftPolicy, TrafficConfig, VehicleFactorsConfig};

static BUILTIN: LazyLock<FactorTables> = LazyLock::new(FactorTables::defaults);

/// Every constant rate used by the trip and shift calculators.
///
/// # Example
///
/// ```
/// use emission_engine::config::FactorTables;
/// use emission_engine::models::{FuelClass, VehicleClass};
/// use rust_decimal::Decimal;
///
/// let tables = FactorTables::builtin();
/// let rate = tables.vehicle_fuel_rate(VehicleClass::Car, FuelClass::Petrol).unwrap();
/// assert_eq!(rate, Decimal::new(192, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorTables {
    vehicles: BTreeMap<VehicleClass, BTreeMap<FuelClass, Decimal>>,
    traffic: BTreeMap<TrafficCondition, Decimal>,
    machines: BTreeMap<String, Decimal>,
    age_penalty_per_year: Decimal,
    grid_emission_factor: Decimal,
    policy: ShiftPolicy,
}

impl FactorTables {
    /// Builds a table set from loaded configuration, checking it is usable.
    ///
    /// Fails with `InvalidConfiguration` if any rate is negative, a traffic
    /// condition has no entry, a vehicle row is empty, or the grid factor
    /// is not positive. Machine identifiers are lowercased.
    pub fn new(
        vehicles: VehicleFactorsConfig,
        traffic: TrafficConfig,
        machines: MachinesConfig,
        policy: ShiftPolicy,
    ) -> EngineResult<Self> {
        for (vehicle, fuels) in &vehicles.vehicles {
            if fuels.is_empty() {
                return Err(invalid(format!("vehicle '{}' has no permitted fuels", vehicle)));
            }
            for (fuel, rate) in fuels {
                ensure_non_negative(*rate, || format!("rate for {} / {}", vehicle, fuel))?;
            }
        }

        for condition in TrafficCondition::ALL {
            let addition = traffic
                .traffic
                .get(&condition)
                .ok_or_else(|| invalid(format!("no traffic addition for '{}'", condition)))?;
            ensure_non_negative(*addition, || format!("traffic addition for {}", condition))?;
        }

        let mut machine_rates = BTreeMap::new();
        for (id, rate) in machines.machines {
            ensure_non_negative(rate, || format!("rate for machine '{}'", id))?;
            machine_rates.insert(id.trim().to_lowercase(), rate);
        }

        ensure_non_negative(vehicles.age_penalty_per_year, || {
            "age_penalty_per_year".to_string()
        })?;
        if vehicles.grid_emission_factor <= Decimal::ZERO {
            return Err(invalid("grid_emission_factor must be positive".to_string()));
        }

        Ok(Self {
            vehicles: vehicles.vehicles,
            traffic: traffic.traffic,
            machines: machine_rates,
            age_penalty_per_year: vehicles.age_penalty_per_year,
            grid_emission_factor: vehicles.grid_emission_factor,
            policy,
        })
    }

    /// Returns the compiled-in factor tables, initialised on first use.
    pub fn builtin() -> &'static FactorTables {
        &BUILTIN
    }

    fn defaults() -> Self {
        let row = |entries: &[(FuelClass, i64, u32)]| -> BTreeMap<FuelClass, Decimal> {
            entries
                .iter()
                .map(|&(fuel, num, scale)| (fuel, Decimal::new(num, scale)))
                .collect()
        };

        let vehicles = BTreeMap::from([
            (
                VehicleClass::Car,
                row(&[
                    (FuelClass::Petrol, 192, 3),
                    (FuelClass::Diesel, 171, 3),
                    (FuelClass::Electric, 53, 3),
                    (FuelClass::Hybrid, 111, 3),
                    (FuelClass::Cng, 163, 3),
                ]),
            ),
            (
                VehicleClass::Bus,
                row(&[
                    (FuelClass::Diesel, 67, 3),
                    (FuelClass::Electric, 35, 3),
                    (FuelClass::Cng, 58, 3),
                ]),
            ),
            (
                VehicleClass::Truck,
                row(&[(FuelClass::Diesel, 887, 3), (FuelClass::Cng, 750, 3)]),
            ),
            (
                VehicleClass::Bike,
                row(&[(FuelClass::Petrol, 103, 3), (FuelClass::Electric, 26, 3)]),
            ),
            (
                VehicleClass::Scooter,
                row(&[(FuelClass::Petrol, 86, 3), (FuelClass::Electric, 22, 3)]),
            ),
        ]);

        let traffic = BTreeMap::from([
            (TrafficCondition::Light, Decimal::ZERO),
            (TrafficCondition::Moderate, Decimal::new(2, 2)),
            (TrafficCondition::Heavy, Decimal::new(5, 2)),
        ]);

        let machines = MachineClass::ALL
            .into_iter()
            .map(|machine| {
                let rate = match machine {
                    MachineClass::CuttingStitching => 5,
                    MachineClass::SoleMolding => 20,
                    MachineClass::Lasting => 10,
                    MachineClass::AdhesiveDrying => 15,
                    MachineClass::FinishingPackaging => 5,
                    MachineClass::ShoeBoxesLabels => 5,
                };
                (machine.as_str().to_string(), Decimal::from(rate))
            })
            .collect();

        Self {
            vehicles,
            traffic,
            machines,
            age_penalty_per_year: Decimal::new(5, 3),
            grid_emission_factor: Decimal::new(716, 3),
            policy: ShiftPolicy::default(),
        }
    }

    /// Looks up the emission rate for a vehicle and fuel.
    ///
    /// The rate is kg CO2 per km, or per passenger-km for buses.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if the vehicle class has no rate row.
    /// - `InvalidFuelForVehicle` if the fuel is not permitted for the vehicle.
    pub fn vehicle_fuel_rate(
        &self,
        vehicle: VehicleClass,
        fuel: FuelClass,
    ) -> EngineResult<Decimal> {
        self.vehicle_row(vehicle)?
            .get(&fuel)
            .copied()
            .ok_or(EngineError::InvalidFuelForVehicle { vehicle, fuel })
    }

    /// Returns the fuels permitted for a vehicle, in declaration order.
    pub fn allowed_fuels(&self, vehicle: VehicleClass) -> EngineResult<Vec<FuelClass>> {
        Ok(self.vehicle_row(vehicle)?.keys().copied().collect())
    }

    /// Returns the fuel selected by default for a vehicle: its first permitted fuel.
    ///
    /// # Example
    ///
    /// ```
    /// use emission_engine::config::FactorTables;
    /// use emission_engine::models::{FuelClass, VehicleClass};
    ///
    /// let tables = FactorTables::builtin();
    /// assert_eq!(tables.default_fuel(VehicleClass::Bus).unwrap(), FuelClass::Diesel);
    /// ```
    pub fn default_fuel(&self, vehicle: VehicleClass) -> EngineResult<FuelClass> {
        self.vehicle_row(vehicle)?
            .keys()
            .next()
            .copied()
            .ok_or_else(|| invalid(format!("vehicle '{}' has no permitted fuels", vehicle)))
    }

    /// Returns the flat kg CO2 per km added for a traffic condition.
    pub fn traffic_addition(&self, condition: TrafficCondition) -> EngineResult<Decimal> {
        self.traffic
            .get(&condition)
            .copied()
            .ok_or_else(|| invalid(format!("no traffic addition for '{}'", condition)))
    }

    /// Looks up a machine's hourly emission rate, failing for unknown machines.
    pub fn machine_rate(&self, machine_id: &str) -> EngineResult<Decimal> {
        self.machines
            .get(&machine_id.trim().to_lowercase())
            .copied()
            .ok_or_else(|| invalid(format!("unknown machine class '{}'", machine_id)))
    }

    /// Looks up a machine's hourly emission rate, treating unknown machines as zero.
    ///
    /// This is the lookup used on the shift path.
    pub fn machine_rate_or_zero(&self, machine_id: &str) -> Decimal {
        self.machine_rate(machine_id).unwrap_or(Decimal::ZERO)
    }

    /// Returns the fractional emission increase per year of vehicle age.
    pub fn age_penalty_per_year(&self) -> Decimal {
        self.age_penalty_per_year
    }

    /// Returns the grid emission factor in kg CO2 per kWh.
    pub fn grid_emission_factor(&self) -> Decimal {
        self.grid_emission_factor
    }

    /// Returns the shift logging policy.
    pub fn policy(&self) -> &ShiftPolicy {
        &self.policy
    }

    fn vehicle_row(&self, vehicle: VehicleClass) -> EngineResult<&BTreeMap<FuelClass, Decimal>> {
        self.vehicles
            .get(&vehicle)
            .ok_or_else(|| invalid(format!("no emission rates for vehicle '{}'", vehicle)))
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfiguration { message }
}

fn ensure_non_negative(value: Decimal, what: impl FnOnce() -> String) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(format!("{} must not be negative (got {})", what(), value)));
    }
    Ok(())
}
