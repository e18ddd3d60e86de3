//! History CLI command

use crate::config::Settings;
use crate::error::PlannerResult;
use crate::history::HistoryLog;
use crate::storage::DataStore;

/// Show recorded plans, newest first
pub fn handle_history_command(store: &DataStore, settings: &Settings, limit: usize) -> PlannerResult<()> {
    let log = HistoryLog::new(store.paths().history_log());
    let records = log.read_recent(limit)?;

    if records.is_empty() {
        println!("No plans recorded yet. Use 'mealplan plan --record' to keep one.");
        return Ok(());
    }

    for record in records.iter().rev() {
        println!("{}", record.format_summary(&settings.currency_symbol));
    }
    println!();
    println!(
        "Recipes from the last {} plan(s) are skipped by 'mealplan plan'.",
        settings.history_lookback
    );
    Ok(())
}
