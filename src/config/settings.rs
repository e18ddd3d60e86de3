//! User settings for mealplan
//!
//! Planning defaults, grocery list layout, and the scoring weight table.
//! Every field has a default, so a partial `config.json` is always valid.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::display::grocery::default_category_order;
use crate::error::PlannerError;
use crate::services::selection::ScoringWeights;

/// User settings for mealplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Plan length when `--days` is not given
    #[serde(default = "default_days")]
    pub default_days: u32,

    /// Budget ceiling when `--budget` is not given
    #[serde(default)]
    pub default_budget: Option<f64>,

    /// How many preceding dinners a protein may not repeat within
    #[serde(default = "default_rotation_window")]
    pub rotation_window: usize,

    /// Weekdays (0 = Sunday) reserved for leftovers
    #[serde(default)]
    pub leftover_days: BTreeSet<u32>,

    /// Buy optional recipe ingredients too
    #[serde(default)]
    pub include_optional_ingredients: bool,

    /// Let backfill exceed the budget as well as the rotation
    #[serde(default)]
    pub relax_budget_on_backfill: bool,

    /// Recorded plans whose recipes are excluded from new plans
    #[serde(default = "default_history_lookback")]
    pub history_lookback: usize,

    /// Grocery aisle order; unlisted categories follow alphabetically
    #[serde(default = "default_category_order")]
    pub category_order: Vec<String>,

    /// Selection scoring table
    #[serde(default)]
    pub scoring: ScoringWeights,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_days() -> u32 {
    7
}

fn default_rotation_window() -> usize {
    2
}

fn default_history_lookback() -> usize {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_days: default_days(),
            default_budget: None,
            rotation_window: default_rotation_window(),
            leftover_days: BTreeSet::new(),
            include_optional_ingredients: false,
            relax_budget_on_backfill: false,
            history_lookback: default_history_lookback(),
            category_order: default_category_order(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PlannerError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the planner cannot work with
    pub fn validate(&self) -> Result<(), PlannerError> {
        if let Some(budget) = self.default_budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(PlannerError::Config(format!(
                    "default_budget must be a non-negative amount, got {}",
                    budget
                )));
            }
        }
        if !self.scoring.jitter.is_finite() || self.scoring.jitter < 0.0 {
            return Err(PlannerError::Config(
                "scoring.jitter must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
