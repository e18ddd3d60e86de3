use anyhow::Result;
use clap::{Parser, Subcommand};

use mealplan::cli::{
    handle_convert_command, handle_grocery_command, handle_history_command, handle_plan_command,
    handle_price_command, handle_recipe_command, GroceryArgs, PlanArgs, RecipeCommands,
};
use mealplan::config::{paths::PlannerPaths, settings::Settings};
use mealplan::storage::DataStore;

#[derive(Parser)]
#[command(
    name = "mealplan",
    author = "Kaylee Beyene",
    version,
    about = "Budget-constrained meal planning and grocery lists",
    long_about = "mealplan picks a week of dinners from your recipe catalog that \
                  fits your budget, rotates proteins, respects your likes and \
                  dislikes, and prints a consolidated grocery list priced by the \
                  package."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with empty catalog files
    Init,

    /// Plan dinners and build the grocery list
    Plan(PlanArgs),

    /// Recipe catalog commands
    #[command(subcommand)]
    Recipe(RecipeCommands),

    /// Build a grocery list for specific recipes
    Grocery(GroceryArgs),

    /// Convert a quantity between units
    Convert {
        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
        /// Unit to convert from
        from: String,
        /// Unit to convert to
        to: String,
    },

    /// Price a quantity of one ingredient
    Price {
        /// Ingredient name or ID
        ingredient: String,
        /// Amount needed
        quantity: f64,
        /// Unit of the amount (defaults to the base unit)
        unit: Option<String>,
    },

    /// Show recently recorded plans
    History {
        /// Number of plans to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    mealplan::logging::init(cli.verbose);

    let paths = PlannerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let store = DataStore::new(paths.clone());

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing mealplan at: {}", paths.base_dir().display());
            let created = store.initialize(&settings)?;
            if created.is_empty() {
                println!("Nothing to do; all files already exist.");
            }
            for path in &created {
                println!("  created {}", path.display());
            }
            println!(
                "Add recipes to {} and prices to {}.",
                paths.recipes_file().display(),
                paths.ingredients_file().display()
            );
        }
        Some(Commands::Plan(args)) => handle_plan_command(&store, &settings, args)?,
        Some(Commands::Recipe(cmd)) => handle_recipe_command(&store, &settings, cmd)?,
        Some(Commands::Grocery(args)) => handle_grocery_command(&store, &settings, args)?,
        Some(Commands::Convert { quantity, from, to }) => {
            handle_convert_command(quantity, &from, &to)?
        }
        Some(Commands::Price {
            ingredient,
            quantity,
            unit,
        }) => handle_price_command(&store, &settings, &ingredient, quantity, unit.as_deref())?,
        Some(Commands::History { limit }) => handle_history_command(&store, &settings, limit)?,
        Some(Commands::Config) => {
            println!("mealplan Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("History log:      {}", paths.history_log().display());
            println!();
            println!("Settings:");
            println!("  Default days:       {}", settings.default_days);
            match settings.default_budget {
                Some(budget) => println!("  Default budget:     {:.2}", budget),
                None => println!("  Default budget:     none"),
            }
            println!("  Rotation window:    {}", settings.rotation_window);
            println!("  Leftover days:      {:?}", settings.leftover_days);
            println!("  History lookback:   {}", settings.history_lookback);
            println!("  Optional items:     {}", settings.include_optional_ingredients);
            println!("  Category order:     {}", settings.category_order.join(", "));
        }
        None => {
            println!("mealplan - budget-constrained meal planning");
            println!();
            println!("Run 'mealplan --help' for usage information.");
            println!("Run 'mealplan init' to set up the data directory.");
            println!("Run 'mealplan plan' to plan the week.");
        }
    }

    Ok(())
}
