//! Error types for the Emission Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing emissions.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::{FuelClass, VehicleClass};

/// The main error type for the Emission Computation Engine.
///
/// All operations in the engine return this error type. Nothing here is
/// fatal to the process; a failed computation affects only its caller.
///
/// # Example
///
/// ```
/// use emission_engine::error::EngineError;
/// use emission_engine::models::{FuelClass, VehicleClass};
///
/// let error = EngineError::InvalidFuelForVehicle {
///     vehicle: VehicleClass::Truck,
///     fuel: FuelClass::Petrol,
/// };
/// assert_eq!(error.to_string(), "Fuel 'petrol' is not allowed for vehicle 'truck'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A factor table lookup key is entirely unknown, or a table is malformed.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the missing or malformed entry.
        message: String,
    },

    /// The fuel is not in the set permitted for the vehicle class.
    #[error("Fuel '{fuel}' is not allowed for vehicle '{vehicle}'")]
    InvalidFuelForVehicle {
        /// The vehicle class.
        vehicle: VehicleClass,
        /// The rejected fuel.
        fuel: FuelClass,
    },

    /// A trip or material input value is out of range.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What made the value invalid.
        message: String,
    },

    /// A required field was absent or could not be parsed.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field.
        field: String,
    },

    /// The shift starts on a day on which logging is not allowed.
    #[error("Cannot log operations on a rest day ({weekday} {date})")]
    RestDayNotAllowed {
        /// The calendar date of the shift start.
        date: NaiveDate,
        /// The weekday name of that date.
        weekday: String,
    },

    /// The shift does not end strictly after it starts.
    #[error("Shift end time {end} must be after shift start time {start}")]
    EndBeforeStart {
        /// The shift start.
        start: NaiveDateTime,
        /// The shift end.
        end: NaiveDateTime,
    },

    /// The lunch break is incomplete, inverted, or outside the shift.
    #[error("Invalid lunch break: {message}")]
    InvalidLunchBreak {
        /// A description of the problem.
        message: String,
    },
}

impl EngineError {
    /// An `InvalidInput` for a value too large for decimal arithmetic.
    pub fn overflow(field: &str) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: "value is too large to compute an emission".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
