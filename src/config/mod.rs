//! Emission factor configuration for the Emission Computation Engine.
//!
//! This module provides the constant factor tables used by the calculators,
//! either compiled in or loaded from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use emission_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/factors").unwrap();
//! println!("Grid factor: {}", config.tables().grid_emission_factor());
//! ```

mod loader;
mod tables;
mod types;

pub use loader::ConfigLoader;
pub use tables::FactorTables;
pub use types::{MachinesConfig, ShiftPolicy, TrafficConfig, VehicleFactorsConfig};
