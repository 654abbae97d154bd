//! Emission Computation Engine
//!
//! This crate computes estimated CO2 emissions for vehicle trips (vehicle and
//! fuel class, distance, traffic, vehicle age, passengers) and for factory
//! machine shifts (machine class, shift span, lunch break), with an audit
//! trail of every rule applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
