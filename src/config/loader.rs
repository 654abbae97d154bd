//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading emission
//! factor tables from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::tables::FactorTables;
use super::types::{MachinesConfig, ShiftPolicy, TrafficConfig, VehicleFactorsConfig};

/// Loads and provides access to the emission factor tables.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/factors/
/// ├── vehicles.yaml   # Age penalty, grid factor, vehicle x fuel rates
/// ├── traffic.yaml    # Per-km traffic additions
/// ├── machines.yaml   # Machine hourly rates
/// └── policy.yaml     # Rest days (optional, defaults to Sunday)
/// ```
///
/// # Example
///
/// ```no_run
/// use emission_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/factors")?;
/// let rate = loader.tables().machine_rate("sole_molding")?;
/// println!("Sole molding: {} kg/h", rate);
/// # Ok::<(), emission_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: FactorTables,
}

impl ConfigLoader {
    /// Loads the factor tables from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - A required file is missing (`ConfigNotFound`)
    /// - A file contains invalid YAML or unknown keys (`ConfigParseError`)
    /// - The tables are unusable, e.g. negative rates (`InvalidConfiguration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let vehicles = Self::load_yaml::<VehicleFactorsConfig>(&path.join("vehicles.yaml"))?;
        let traffic = Self::load_yaml::<TrafficConfig>(&path.join("traffic.yaml"))?;
        let machines = Self::load_yaml::<MachinesConfig>(&path.join("machines.yaml"))?;

        let policy_path = path.join("policy.yaml");
        let policy = if policy_path.exists() {
            Self::load_yaml::<ShiftPolicy>(&policy_path)?
        } else {
            debug!(path = %policy_path.display(), "No shift policy file, using default rest days");
            ShiftPolicy::default()
        };

        let tables = FactorTables::new(vehicles, traffic, machines, policy)?;
        debug!(path = %path.display(), "Loaded emission factor tables");

        Ok(Self { tables })
    }

    /// Creates a loader over the compiled-in factor tables.
    pub fn builtin() -> Self {
        Self {
            tables: FactorTables::builtin().clone(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded factor tables.
    pub fn tables(&self) -> &FactorTables {
        &self.tables
    }
}
