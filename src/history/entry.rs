//! Plan history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Money, PlanId, RecipeId};
use crate::services::PlanOutcome;

/// A recipe as it appeared in a recorded plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedRecipe {
    pub recipe_id: RecipeId,

    /// Name at the time of recording, kept for display if the recipe is later removed
    pub name: String,
}

/// One recorded plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRecord {
    /// When the plan was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    pub plan_id: PlanId,

    /// Cooked recipes in plan order
    pub recipes: Vec<RecordedRecipe>,

    /// Consolidated grocery cost
    pub plan_cost: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,

    pub within_budget: bool,
}

impl PlanRecord {
    /// Capture a finished plan
    pub fn from_outcome(outcome: &PlanOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            plan_id: outcome.id,
            recipes: outcome
                .recipes
                .iter()
                .map(|r| RecordedRecipe {
                    recipe_id: r.recipe_id,
                    name: r.name.clone(),
                })
                .collect(),
            plan_cost: outcome.plan_cost,
            budget: outcome.budget,
            within_budget: outcome.within_budget,
        }
    }

    pub fn recipe_ids(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.recipes.iter().map(|r| r.recipe_id)
    }

    /// One-line summary for listings
    pub fn format_summary(&self, currency_symbol: &str) -> String {
        let names: Vec<&str> = self.recipes.iter().map(|r| r.name.as_str()).collect();
        let budget = match self.budget {
            Some(budget) if self.within_budget => {
                format!(" (budget {})", budget.format_with_symbol(currency_symbol))
            }
            Some(budget) => format!(
                " (over budget {})",
                budget.format_with_symbol(currency_symbol)
            ),
            None => String::new(),
        };
        format!(
            "{} {} {}{}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.plan_id,
            self.plan_cost.format_with_symbol(currency_symbol),
            budget,
            names.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(within_budget: bool) -> PlanRecord {
        PlanRecord {
            timestamp: "2024-03-04T18:30:00Z".parse().unwrap(),
            plan_id: PlanId::new(),
            recipes: vec![
                RecordedRecipe {
                    recipe_id: RecipeId::new(),
                    name: "Tacos".into(),
                },
                RecordedRecipe {
                    recipe_id: RecipeId::new(),
                    name: "Curry".into(),
                },
            ],
            plan_cost: Money::from_cents(4250),
            budget: Some(Money::from_cents(5000)),
            within_budget,
        }
    }

    #[test]
    fn test_summary() {
        let summary = record(true).format_summary("$");
        assert!(summary.starts_with("2024-03-04 18:30 pln-"));
        assert!(summary.contains("$42.50 (budget $50.00): Tacos, Curry"));

        let summary = record(false).format_summary("$");
        assert!(summary.contains("(over budget $50.00)"));
    }

    #[test]
    fn test_serialization_skips_missing_budget() {
        let mut entry = record(true);
        entry.budget = None;
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"budget\""));
        let back: PlanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.recipes, entry.recipes);
    }
}
