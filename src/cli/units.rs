//! Unit conversion and ingredient pricing commands

use crate::config::Settings;
use crate::display::grocery::PRICE_UNKNOWN;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{format_quantity, unit, Catalog, Money, PricingMethod};
use crate::services::pricing;
use crate::storage::DataStore;

/// Handle `mealplan convert <quantity> <from> <to>`
pub fn handle_convert_command(quantity: f64, from: &str, to: &str) -> PlannerResult<()> {
    if !quantity.is_finite() {
        return Err(PlannerError::Validation(format!(
            "Quantity must be a number, got {}",
            quantity
        )));
    }
    let converted = unit::convert(quantity, from, to)?;
    let from_unit = unit::normalize(from)?;
    let to_unit = unit::normalize(to)?;
    println!(
        "{} {} = {} {}",
        format_quantity(quantity),
        from_unit,
        format_quantity(converted),
        to_unit
    );
    Ok(())
}

/// Handle `mealplan price <ingredient> <quantity> [unit]`
pub fn handle_price_command(
    store: &DataStore,
    settings: &Settings,
    ingredient: &str,
    quantity: f64,
    unit: Option<&str>,
) -> PlannerResult<()> {
    let catalog = Catalog::new(Vec::new(), store.load_ingredients()?);
    let found = catalog
        .find_ingredient(ingredient)
        .ok_or_else(|| PlannerError::ingredient_not_found(ingredient))?;

    let cost = pricing::cost(found, quantity, unit);
    let amount = match unit {
        Some(unit) => format!("{} {}", format_quantity(quantity), unit),
        None => format_quantity(quantity),
    };

    if cost.flagged {
        println!("{} {} {}", amount, found.name, PRICE_UNKNOWN);
        return Ok(());
    }

    let price = Money::from_dollars_rounded(cost.amount).format_with_symbol(&settings.currency_symbol);
    let how = match (cost.method, cost.packages, found.package_label()) {
        (PricingMethod::SinglePackage, _, Some(label)) => {
            format!("assumed 1 package of {}", label)
        }
        (_, Some(count), Some(label)) => format!("{} x {} package", count, label),
        (PricingMethod::BaseUnit, _, _) => format!(
            "at {} per {}",
            found
                .base_price()
                .map(Money::from_dollars_rounded)
                .unwrap_or_default()
                .format_with_symbol(&settings.currency_symbol),
            found.base_unit.as_deref().unwrap_or("unit")
        ),
        _ => "nothing to buy".to_string(),
    };
    println!("{} {}: {} ({})", amount, found.name, price, how);
    Ok(())
}
