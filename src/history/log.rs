//! Append-only plan history log

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::PlannerResult;
use crate::models::RecipeId;
use crate::storage::{append_json_line, read_json_lines};

use super::entry::PlanRecord;

/// Writes plan records to a JSON Lines file
pub struct HistoryLog {
    log_path: PathBuf,
}

impl HistoryLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append a record; flushed before returning
    pub fn record(&self, entry: &PlanRecord) -> PlannerResult<()> {
        append_json_line(&self.log_path, entry)?;
        tracing::info!(plan = %entry.plan_id, recipes = entry.recipes.len(), "plan recorded");
        Ok(())
    }

    /// All records, oldest first
    pub fn read_all(&self) -> PlannerResult<Vec<PlanRecord>> {
        read_json_lines(&self.log_path)
    }

    /// The most recent `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> PlannerResult<Vec<PlanRecord>> {
        let mut all = self.read_all()?;
        let start = all.len().saturating_sub(count);
        Ok(all.split_off(start))
    }

    /// Recipes served in the last `lookback` recorded plans
    pub fn recent_recipe_ids(&self, lookback: usize) -> PlannerResult<HashSet<RecipeId>> {
        Ok(self
            .read_recent(lookback)?
            .iter()
            .flat_map(|r| r.recipe_ids())
            .collect())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
