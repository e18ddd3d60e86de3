//! Service layer for mealplan
//!
//! The services implement the planning engine on top of an in-memory
//! [`Catalog`](crate::models::Catalog): pricing, aggregation, selection,
//! budget repair, and the orchestration that ties them together. None of them
//! perform I/O.

pub mod aggregation;
pub mod planner;
pub mod pricing;
pub mod repair;
pub mod selection;

pub use aggregation::{CostAggregator, LineBreakdown, PantryOutcome, RecipeCost};
pub use planner::{PlanOutcome, PlanRequest, PlanningService};
pub use pricing::LineCost;
pub use repair::{BudgetRepair, CostedRecipe, RepairOutcome, Swap};
pub use selection::{Candidate, MealSelector, ScoringWeights, Selection, SelectionRequest};
