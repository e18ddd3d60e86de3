//! Ingredient cost model
//!
//! Prices a needed quantity of one ingredient. The resolution order is fixed,
//! because it decides which numeric path produces the displayed cost:
//!
//! 1. Needed unit matches the package unit: buy whole packages.
//! 2. Needed unit converts into the package unit: buy whole packages of the
//!    converted quantity.
//! 3. A per-base-unit price exists and the needed unit is (or defaults to) the
//!    base unit: continuous pricing, no quantization.
//! 4. A package price exists: assume exactly one package.
//! 5. Otherwise the price is unknown: zero cost, flagged.
//!
//! Step 4 is skipped when the needed unit is present but unrecognized, so a
//! line measured in "glugs" is reported as unknown rather than guessed.
//!
//! Quantities given in the package unit are quantized with a plain `ceil`.
//! Converted or summed quantities carry floating-point noise, so they snap to
//! a whole package count when within [`PACKAGE_SNAP`] of one.

use serde::Serialize;

use crate::models::{Ingredient, PricingMethod, UnitKey};

/// Relative distance from a whole package count treated as conversion noise,
/// so that 16 oz converted to pounds still buys exactly one 1 lb package
pub const PACKAGE_SNAP: f64 = 1e-9;

/// The priced result for one quantity of one ingredient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCost {
    /// Cost in dollars, unrounded
    pub amount: f64,
    /// Whole packages to buy, for package-based methods
    pub packages: Option<u32>,
    /// Rule that produced the amount
    pub method: PricingMethod,
    /// True when no price could be determined
    pub flagged: bool,
}

impl LineCost {
    fn packages(count: u32, price: f64, method: PricingMethod) -> Self {
        Self {
            amount: f64::from(count) * price,
            packages: Some(count),
            method,
            flagged: false,
        }
    }

    fn continuous(amount: f64) -> Self {
        Self {
            amount,
            packages: None,
            method: PricingMethod::BaseUnit,
            flagged: false,
        }
    }

    /// Zero-cost result for nothing to buy
    pub fn not_needed() -> Self {
        Self {
            amount: 0.0,
            packages: None,
            method: PricingMethod::NotNeeded,
            flagged: false,
        }
    }

    /// Zero-cost, flagged result
    pub fn unknown() -> Self {
        Self {
            amount: 0.0,
            packages: None,
            method: PricingMethod::Unknown,
            flagged: true,
        }
    }
}

/// Whole packages needed for `quantity`, always rounding up
///
/// `None` when the count does not fit in a `u32`.
pub fn packages_needed(quantity: f64, package_size: f64) -> Option<u32> {
    whole_packages((quantity / package_size).ceil())
}

/// Whole packages needed for a converted or summed `quantity`
///
/// Rounds up like [`packages_needed`], except that a ratio within
/// [`PACKAGE_SNAP`] of a whole number snaps to it.
pub fn packages_needed_snapped(quantity: f64, package_size: f64) -> Option<u32> {
    let ratio = quantity / package_size;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= PACKAGE_SNAP * nearest.max(1.0) {
        whole_packages(nearest)
    } else {
        whole_packages(ratio.ceil())
    }
}

fn whole_packages(count: f64) -> Option<u32> {
    if count.is_finite() && count >= 0.0 && count <= f64::from(u32::MAX) {
        Some(count as u32)
    } else {
        None
    }
}

/// Price `quantity` of `ingredient` measured in `unit`
pub fn cost(ingredient: &Ingredient, quantity: f64, unit: Option<&str>) -> LineCost {
    resolve(ingredient, quantity, unit, false)
}

/// Price a quantity that was produced by unit conversion, summing or
/// subtraction, tolerating floating-point noise at package boundaries
pub fn cost_snapped(ingredient: &Ingredient, quantity: f64, unit: Option<&str>) -> LineCost {
    resolve(ingredient, quantity, unit, true)
}

fn resolve(ingredient: &Ingredient, quantity: f64, unit: Option<&str>, snapped: bool) -> LineCost {
    if !quantity.is_finite() || quantity <= 0.0 {
        return LineCost::not_needed();
    }

    let needed = UnitKey::from_text(unit);

    // Steps 1 and 2: whole packages
    if let (Some(price), Some(size), Some(package_unit), Some(needed)) = (
        ingredient.package_price(),
        ingredient.package_quantity(),
        UnitKey::from_text(ingredient.package_unit.as_deref()),
        needed.as_ref(),
    ) {
        let quantized = if *needed == package_unit {
            let count = if snapped {
                packages_needed_snapped(quantity, size)
            } else {
                packages_needed(quantity, size)
            };
            Some((count, PricingMethod::Package))
        } else {
            needed.convert(quantity, &package_unit).map(|converted| {
                (
                    packages_needed_snapped(converted, size),
                    PricingMethod::ConvertedPackage,
                )
            })
        };

        match quantized {
            Some((Some(count), method)) => return LineCost::packages(count, price, method),
            Some((None, _)) => {
                tracing::warn!(
                    ingredient = %ingredient.name,
                    quantity,
                    "package count out of range; price unknown"
                );
                return LineCost::unknown();
            }
            None => {}
        }
    }

    // Step 3: continuous base-unit pricing
    if let Some(base_price) = ingredient.base_price() {
        let base_unit = UnitKey::from_text(ingredient.base_unit.as_deref());
        let in_base = match (&needed, &base_unit) {
            (None, _) => Some(quantity),
            (Some(needed), Some(base)) => needed.convert(quantity, base),
            (Some(_), None) => None,
        };
        if let Some(base_quantity) = in_base {
            return LineCost::continuous(base_quantity * base_price);
        }
    }

    // Step 4: one package as a last estimate
    let unit_usable = matches!(needed, None | Some(UnitKey::Known(_)));
    if let Some(price) = ingredient.package_price() {
        if unit_usable {
            tracing::debug!(
                ingredient = %ingredient.name,
                unit = unit.unwrap_or(""),
                "quantity does not relate to package; assuming one package"
            );
            return LineCost::packages(1, price, PricingMethod::SinglePackage);
        }
    }

    // Step 5
    tracing::debug!(
        ingredient = %ingredient.name,
        unit = unit.unwrap_or(""),
        "no usable price"
    );
    LineCost::unknown()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoreCategory;

    fn beef() -> Ingredient {
        Ingredient::new("Ground Beef", StoreCategory::Meat).with_package(5.0, 1.0, "lb")
    }

    #[test]
    fn test_scenario_pound_and_a_half() {
        let result = cost(&beef(), 1.5, Some("lb"));
        assert_eq!(result.packages, Some(2));
        assert_eq!(result.method, PricingMethod::Package);
        assert!((result.amount - 10.0).abs() < 1e-9);
        assert!(!result.flagged);
    }

    #[test]
    fn test_quantization_boundary() {
        let exact = cost(&beef(), 1.0, Some("pounds"));
        assert_eq!(exact.packages, Some(1));

        let over = cost(&beef(), 1.0 + 1e-6, Some("lb"));
        assert_eq!(over.packages, Some(2));
    }

    #[test]
    fn test_same_unit_never_rounds_down() {
        let result = cost(&beef(), 1.0 + 1e-10, Some("lb"));
        assert_eq!(result.packages, Some(2));
        assert!((result.amount - 10.0).abs() < 1e-9);

        let result = cost(&beef(), 1.0000000000000002, Some("lb"));
        assert_eq!(result.packages, Some(2));
    }

    #[test]
    fn test_snapped_cost_absorbs_noise() {
        let result = cost_snapped(&beef(), 1.0 + 1e-12, Some("lb"));
        assert_eq!(result.packages, Some(1));

        let result = cost_snapped(&beef(), 1.0 + 1e-6, Some("lb"));
        assert_eq!(result.packages, Some(2));
    }

    #[test]
    fn test_huge_quantity_flagged() {
        let result = cost(&beef(), 1e12, Some("lb"));
        assert!(result.flagged);
        assert_eq!(result.method, PricingMethod::Unknown);
        assert!(result.packages.is_none());

        let result = cost(&beef(), 1e15, Some("oz"));
        assert!(result.flagged);
    }

    #[test]
    fn test_converted_package() {
        // 16 oz is one pound even after floating-point conversion
        let result = cost(&beef(), 16.0, Some("oz"));
        assert_eq!(result.method, PricingMethod::ConvertedPackage);
        assert_eq!(result.packages, Some(1));

        let result = cost(&beef(), 500.0, Some("g"));
        assert_eq!(result.packages, Some(2));
        assert!((result.amount - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_matching_unrecognized_units() {
        let tomatoes =
            Ingredient::new("Diced Tomatoes", StoreCategory::Pantry).with_package(0.95, 1.0, "can");
        let result = cost(&tomatoes, 2.0, Some("Cans"));
        assert_eq!(result.method, PricingMethod::Package);
        assert_eq!(result.packages, Some(2));
    }

    #[test]
    fn test_base_unit_pricing() {
        let saffron = Ingredient::new("Saffron", StoreCategory::Pantry).with_base_price(8.0, "g");
        let result = cost(&saffron, 0.5, Some("g"));
        assert_eq!(result.method, PricingMethod::BaseUnit);
        assert!((result.amount - 4.0).abs() < 1e-9);
        assert!(result.packages.is_none());

        // Absent unit defaults to the base unit
        let result = cost(&saffron, 2.0, None);
        assert!((result.amount - 16.0).abs() < 1e-9);

        // Convertible units go through the base unit
        let result = cost(&saffron, 1.0, Some("kg"));
        assert!((result.amount - 8000.0).abs() < 1e-6);
    }

    #[test]
    fn test_package_preferred_over_base_price() {
        let rice = Ingredient::new("Rice", StoreCategory::Pantry)
            .with_package(2.0, 32.0, "oz")
            .with_base_price(0.05, "oz");
        let result = cost(&rice, 10.0, Some("oz"));
        assert_eq!(result.method, PricingMethod::Package);
        assert!((result.amount - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_unit_falls_back_to_single_package() {
        let flour = Ingredient::new("Flour", StoreCategory::Pantry).with_package(2.5, 5.0, "lb");
        let result = cost(&flour, 3.0, Some("cup"));
        assert_eq!(result.method, PricingMethod::SinglePackage);
        assert_eq!(result.packages, Some(1));
        assert!((result.amount - 2.5).abs() < 1e-9);
        assert!(!result.flagged);

        // Missing unit with no base price also estimates one package
        let result = cost(&flour, 3.0, None);
        assert_eq!(result.method, PricingMethod::SinglePackage);
    }

    #[test]
    fn test_unrecognized_unit_flagged() {
        let oil = Ingredient::new("Olive Oil", StoreCategory::Pantry).with_package(6.0, 16.0, "fl oz");
        let result = cost(&oil, 1.0, Some("glug"));
        assert!(result.flagged);
        assert_eq!(result.amount, 0.0);
        assert_eq!(result.method, PricingMethod::Unknown);
    }

    #[test]
    fn test_unpriced_flagged() {
        let mystery = Ingredient::new("Mystery Spice", StoreCategory::Pantry);
        let result = cost(&mystery, 1.0, Some("tsp"));
        assert!(result.flagged);
        assert_eq!(result.amount, 0.0);
    }

    #[test]
    fn test_zero_quantity_costs_nothing() {
        let result = cost(&beef(), 0.0, Some("lb"));
        assert_eq!(result.amount, 0.0);
        assert!(!result.flagged);
        assert_eq!(result.method, PricingMethod::NotNeeded);
    }

    #[test]
    fn test_idempotent() {
        let ingredient = beef();
        let first = cost(&ingredient, 2.3, Some("lb"));
        let second = cost(&ingredient, 2.3, Some("lb"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_packages_needed() {
        assert_eq!(packages_needed(0.1, 1.0), Some(1));
        assert_eq!(packages_needed(2.0, 1.0), Some(2));
        assert_eq!(packages_needed(1.0000000000000002, 1.0), Some(2));
        assert_eq!(packages_needed(f64::from(u32::MAX) * 2.0, 1.0), None);
    }

    #[test]
    fn test_packages_needed_snapped() {
        assert_eq!(packages_needed_snapped(1.0000000000000002, 1.0), Some(1));
        assert_eq!(packages_needed_snapped(2.01, 1.0), Some(3));
        assert_eq!(packages_needed_snapped(2.0, 1.0), Some(2));
    }
}
