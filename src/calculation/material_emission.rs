//! Inventory material emission calculation.
//!
//! Each raw material line emits `quantity x carbon_emission_per_unit`; a
//! product's total is the sum over its lines.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{MaterialEmission, Product, ProductEmissionResult, RawMaterial};

/// Computes the total emission of a single raw material line.
///
/// # Errors
///
/// Returns `InvalidInput` if the quantity or the per-unit factor is negative,
/// or if their product is too large to represent.
///
/// # Example
///
/// ```
/// use emission_engine::calculation::calculate_material_emission;
/// use emission_engine::models::RawMaterial;
/// use rust_decimal::Decimal;
///
/// let leather = RawMaterial {
///     material_name: "leather".to_string(),
///     quantity: Decimal::new(40, 0),
///     carbon_emission_per_unit: Decimal::new(175, 2),
/// };
/// let result = calculate_material_emission(&leather).unwrap();
/// assert_eq!(result.total_carbon_emission, Decimal::new(70, 0));
/// ```
pub fn calculate_material_emission(material: &RawMaterial) -> EngineResult<MaterialEmission> {
    if material.quantity < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: format!("{}.quantity", material.material_name),
            message: format!("must not be negative (got {})", material.quantity),
        });
    }
    if material.carbon_emission_per_unit < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: format!("{}.carbon_emission_per_unit", material.material_name),
            message: format!(
                "must not be negative (got {})",
                material.carbon_emission_per_unit
            ),
        });
    }

    let total_carbon_emission = material
        .quantity
        .checked_mul(material.carbon_emission_per_unit)
        .ok_or_else(|| EngineError::overflow(&format!("{}.quantity", material.material_name)))?;

    Ok(MaterialEmission {
        material_name: material.material_name.clone(),
        quantity: material.quantity,
        carbon_emission_per_unit: material.carbon_emission_per_unit,
        total_carbon_emission,
    })
}

/// Computes the per-material and total emission of a product.
///
/// # Errors
///
/// Any error of [`calculate_material_emission`], or `InvalidInput` for
/// `raw_materials` if the product total overflows.
pub fn calculate_product_emission(product: &Product) -> EngineResult<ProductEmissionResult> {
    let raw_materials = product
        .raw_materials
        .iter()
        .map(calculate_material_emission)
        .collect::<EngineResult<Vec<_>>>()?;

    let total_carbon_emission = raw_materials
        .iter()
        .try_fold(Decimal::ZERO, |total, m| total.checked_add(m.total_carbon_emission))
        .ok_or_else(|| EngineError::overflow("raw_materials"))?;

    Ok(ProductEmissionResult {
        product: product.product.clone(),
        raw_materials,
        total_carbon_emission,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn material(name: &str, quantity: &str, per_unit: &str) -> RawMaterial {
        RawMaterial {
            material_name: name.to_string(),
            quantity: dec(quantity),
            carbon_emission_per_unit: dec(per_unit),
        }
    }

    #[test]
    fn test_product_total_is_sum_of_materials() {
        let product = Product {
            product: "Running Shoe".to_string(),
            raw_materials: vec![
                material("rubber", "120", "2.5"),
                material("mesh", "300", "0.4"),
                material("laces", "200", "0.05"),
            ],
        };

        let result = calculate_product_emission(&product).unwrap();
        assert_eq!(result.raw_materials.len(), 3);
        assert_eq!(result.raw_materials[0].total_carbon_emission, dec("300"));
        assert_eq!(result.raw_materials[1].total_carbon_emission, dec("120"));
        assert_eq!(result.raw_materials[2].total_carbon_emission, dec("10"));
        assert_eq!(result.total_carbon_emission, dec("430"));
    }

    #[test]
    fn test_product_without_materials() {
        let product = Product {
            product: "Gift Card".to_string(),
            raw_materials: vec![],
        };

        let result = calculate_product_emission(&product).unwrap();
        assert_eq!(result.total_carbon_emission, Decimal::ZERO);
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let product = Product {
            product: "Boot".to_string(),
            raw_materials: vec![material("leather", "10", "1"), material("sole", "-2", "3")],
        };

        match calculate_product_emission(&product) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "sole.quantity"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_factor_rejected() {
        let result = calculate_material_emission(&material("glue", "1", "-0.1"));
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[test]
    fn test_material_product_overflow_rejected() {
        let huge = "100000000000000000000";
        match calculate_material_emission(&material("leather", huge, huge)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "leather.quantity"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_product_total_overflow_rejected() {
        // Each line is 5e28, which fits; two of them do not
        let line = "50000000000000000000000000000";
        let product = Product {
            product: "Pallet".to_string(),
            raw_materials: vec![material("crate", line, "1"), material("wrap", line, "1")],
        };

        match calculate_product_emission(&product) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "raw_materials"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
