//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod grocery;
pub mod history;
pub mod plan;
pub mod recipe;
pub mod units;

pub use grocery::{handle_grocery_command, GroceryArgs};
pub use history::handle_history_command;
pub use plan::{handle_plan_command, PlanArgs};
pub use recipe::{handle_recipe_command, RecipeCommands};
pub use units::{handle_convert_command, handle_price_command};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::error::{PlannerError, PlannerResult};
use crate::models::Money;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// CSV (grocery list rows)
    Csv,
    /// JSON with a versioned envelope
    Json,
    /// YAML with a versioned envelope
    Yaml,
}

/// Open the output file, or stdout when none is given
pub(crate) fn open_output(output: Option<&Path>) -> PlannerResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PlannerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write text to the output and flush it
pub(crate) fn write_text(output: Option<&Path>, text: &str) -> PlannerResult<()> {
    let mut writer = open_output(output)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    if let Some(path) = output {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// Parse a dollar amount argument such as "100" or "$85.50"
pub(crate) fn parse_budget(text: &str) -> PlannerResult<f64> {
    let amount = Money::parse(text)
        .map_err(|e| PlannerError::Validation(format!("Invalid budget '{}': {}", text, e)))?;
    if amount.is_negative() {
        return Err(PlannerError::Validation(format!(
            "Budget cannot be negative: {}",
            text
        )));
    }
    Ok(amount.as_dollars())
}
