//! CSV export of grocery lists

use std::io::Write;

use crate::display::grocery::{GroceryList, PRICE_UNKNOWN};
use crate::error::PlannerResult;
use crate::models::format_quantity;

/// Write one row per grocery item, in display order
pub fn export_grocery_csv<W: Write>(list: &GroceryList, writer: W) -> PlannerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["Category", "Item", "Quantity", "Unit", "Packages", "Cost"])?;

    for (category, line) in list.lines() {
        let cost = match line.cost {
            Some(cost) => format!("{:.2}", cost.as_dollars()),
            None => PRICE_UNKNOWN.to_string(),
        };
        csv.write_record([
            category.name().to_string(),
            line.name.clone(),
            format_quantity(line.quantity),
            line.unit.clone().unwrap_or_default(),
            line.packages.map(|p| p.to_string()).unwrap_or_default(),
            cost,
        ])?;
    }

    csv.flush()?;
    Ok(())
}
