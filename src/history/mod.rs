//! Plan history
//!
//! Recorded plans are kept in an append-only JSON Lines log. The recipes of
//! the most recent plans form the exclusion set that keeps the planner from
//! repeating last week's dinners.
//!
//! - `PlanRecord`: one recorded plan with its timestamp, recipes and cost.
//! - `HistoryLog`: appends records and answers "what was served recently".

mod entry;
mod log;

pub use entry::{PlanRecord, RecordedRecipe};
pub use log::HistoryLog;
