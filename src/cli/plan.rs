//! Plan CLI command
//!
//! Loads the catalog, pantry, preferences and recent history, runs the
//! planning service and prints or exports the result.

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{open_output, parse_budget, write_text, OutputFormat};
use crate::config::Settings;
use crate::display::format_plan;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{export_grocery_csv, export_json, export_yaml};
use crate::history::{HistoryLog, PlanRecord};
use crate::services::{PlanRequest, PlanningService};
use crate::storage::DataStore;

/// Arguments for `mealplan plan`
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Number of days to plan (leftover nights included)
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Budget ceiling, e.g. 100 or $85.50
    #[arg(short, long)]
    pub budget: Option<String>,

    /// Preceding dinners a protein may not repeat within
    #[arg(short = 'k', long)]
    pub rotation: Option<usize>,

    /// Ignore recently recorded plans
    #[arg(long)]
    pub no_history: bool,

    /// Record this plan in the history log
    #[arg(long)]
    pub record: bool,

    /// Seed for tie-breaking, for reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (csv writes the grocery list)
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `mealplan plan`
pub fn handle_plan_command(store: &DataStore, settings: &Settings, args: PlanArgs) -> PlannerResult<()> {
    let catalog = store.load_catalog()?;
    if catalog.is_empty() {
        return Err(PlannerError::Validation(
            "The recipe catalog is empty; add recipes to recipes.json first".into(),
        ));
    }

    let history = HistoryLog::new(store.paths().history_log());
    let excluded = if args.no_history {
        HashSet::new()
    } else {
        history.recent_recipe_ids(settings.history_lookback)?
    };

    let mut request = PlanRequest::from_settings(settings);
    if let Some(days) = args.days {
        request.days = days;
    }
    if let Some(budget) = args.budget.as_deref() {
        request.budget = Some(parse_budget(budget)?);
    }
    if let Some(rotation) = args.rotation {
        request.rotation_window = rotation;
    }
    request.excluded = excluded;
    request.preferences = store.load_preferences()?;
    request.pantry = store.load_pantry()?;

    let service = PlanningService::new(&catalog, settings);
    let outcome = match args.seed {
        Some(seed) => service.plan_with_rng(&request, &mut StdRng::seed_from_u64(seed)),
        None => service.plan(&request),
    };

    if args.record {
        history.record(&PlanRecord::from_outcome(&outcome))?;
    }

    let output = args.output.as_deref();
    match args.format {
        OutputFormat::Text => write_text(output, &format_plan(&outcome, &settings.currency_symbol))?,
        OutputFormat::Csv => export_grocery_csv(&outcome.grocery, open_output(output)?)?,
        OutputFormat::Json => export_json("plan", &outcome, &mut open_output(output)?)?,
        OutputFormat::Yaml => export_yaml("plan", &outcome, &mut open_output(output)?)?,
    }

    if args.record && args.format == OutputFormat::Text {
        eprintln!("Plan {} recorded", outcome.id);
    }
    Ok(())
}
