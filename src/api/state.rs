//! Application state for the Emission Computation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, FactorTables};

/// Shared application state.
///
/// Holds the factor tables loaded at startup. They are never mutated, so
/// handlers read them without synchronization.
#[derive(Clone)]
pub struct AppState {
    /// The loaded factor configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the factor tables.
    pub fn tables(&self) -> &FactorTables {
        self.config.tables()
    }
}
