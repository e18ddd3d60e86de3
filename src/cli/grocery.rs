//! Grocery CLI command
//!
//! Builds a consolidated shopping list for recipes chosen by hand.

use std::path::PathBuf;

use clap::Args;

use super::{open_output, write_text, OutputFormat};
use crate::config::Settings;
use crate::display::{format_grocery_list, GroceryListFormatter};
use crate::error::{PlannerError, PlannerResult};
use crate::export::{export_grocery_csv, export_json, export_yaml};
use crate::models::Recipe;
use crate::services::CostAggregator;
use crate::storage::DataStore;

/// Arguments for `mealplan grocery`
#[derive(Args, Debug)]
pub struct GroceryArgs {
    /// Recipe names or IDs
    #[arg(required = true)]
    pub recipes: Vec<String>,

    /// Do not deduct pantry stock
    #[arg(long)]
    pub ignore_pantry: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `mealplan grocery`
pub fn handle_grocery_command(
    store: &DataStore,
    settings: &Settings,
    args: GroceryArgs,
) -> PlannerResult<()> {
    let catalog = store.load_catalog()?;

    let recipes: Vec<&Recipe> = args
        .recipes
        .iter()
        .map(|query| {
            catalog
                .find_recipe(query)
                .ok_or_else(|| PlannerError::recipe_not_found(query))
        })
        .collect::<PlannerResult<_>>()?;

    let aggregator =
        CostAggregator::new(&catalog).with_optional(settings.include_optional_ingredients);
    let items = aggregator.consolidate(&recipes);
    let items = if args.ignore_pantry {
        items
    } else {
        let pantry = store.load_pantry()?;
        aggregator.apply_pantry(items, &pantry).to_buy
    };

    let list = GroceryListFormatter::new(&settings.category_order, &settings.currency_symbol)
        .format(&items);

    let output = args.output.as_deref();
    match args.format {
        OutputFormat::Text => {
            write_text(output, &format_grocery_list(&list, &settings.currency_symbol))?
        }
        OutputFormat::Csv => export_grocery_csv(&list, open_output(output)?)?,
        OutputFormat::Json => export_json("grocery", &list, &mut open_output(output)?)?,
        OutputFormat::Yaml => export_yaml("grocery", &list, &mut open_output(output)?)?,
    }
    Ok(())
}
