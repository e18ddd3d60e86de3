//! Recipe CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_recipe_details, format_recipe_list};
use crate::error::{PlannerError, PlannerResult};
use crate::models::Recipe;
use crate::services::{CostAggregator, RecipeCost};
use crate::storage::DataStore;

/// Recipe subcommands
#[derive(Subcommand, Debug)]
pub enum RecipeCommands {
    /// List recipes with their costs
    List {
        /// Only recipes with this protein or tag
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show a recipe's ingredients and line costs
    Show {
        /// Recipe name or ID
        recipe: String,
    },
}

/// Handle a recipe command
pub fn handle_recipe_command(
    store: &DataStore,
    settings: &Settings,
    cmd: RecipeCommands,
) -> PlannerResult<()> {
    let catalog = store.load_catalog()?;
    let aggregator =
        CostAggregator::new(&catalog).with_optional(settings.include_optional_ingredients);

    match cmd {
        RecipeCommands::List { filter } => {
            let filter: Vec<String> = filter.into_iter().collect();
            let mut recipes: Vec<&Recipe> = catalog
                .recipes()
                .iter()
                .filter(|r| filter.is_empty() || r.matches_any(&filter))
                .collect();
            recipes.sort_by_key(|r| r.name.to_lowercase());

            let rows: Vec<(&Recipe, RecipeCost)> = recipes
                .into_iter()
                .map(|r| (r, aggregator.recipe_cost(r)))
                .collect();
            println!("{}", format_recipe_list(&rows, &settings.currency_symbol));
        }
        RecipeCommands::Show { recipe } => {
            let found = catalog
                .find_recipe(&recipe)
                .ok_or_else(|| PlannerError::recipe_not_found(&recipe))?;
            let cost = aggregator.recipe_cost(found);
            print!(
                "{}",
                format_recipe_details(found, &cost, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
