//! Inventory material models.
//!
//! Raw materials received into inventory carry a per-unit emission factor.
//! These types describe a product's materials and their computed totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw material line of an inventory product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// Name of the material (e.g., "leather").
    pub material_name: String,
    /// Quantity received, in the material's own unit.
    pub quantity: Decimal,
    /// kg CO2 attributed to one unit of the material.
    pub carbon_emission_per_unit: Decimal,
}

/// A product and the raw materials it consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub product: String,
    /// Materials used by the product.
    #[serde(default)]
    pub raw_materials: Vec<RawMaterial>,
}

/// A raw material with its computed total emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialEmission {
    /// Name of the material.
    pub material_name: String,
    /// Quantity received.
    pub quantity: Decimal,
    /// kg CO2 per unit.
    pub carbon_emission_per_unit: Decimal,
    /// quantity x carbon_emission_per_unit.
    pub total_carbon_emission: Decimal,
}

/// Emission totals for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEmissionResult {
    /// Product name.
    pub product: String,
    /// Per-material totals, in input order.
    pub raw_materials: Vec<MaterialEmission>,
    /// Sum of all material totals.
    pub total_carbon_emission: Decimal,
}
