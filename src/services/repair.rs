//! Budget repair
//!
//! Greedy local search over an over-budget plan: repeatedly swap the most
//! expensive recipe for the cheapest strictly cheaper recipe from the pool.
//! Every swap lowers the cost and uses up one pool recipe, so the loop runs at
//! most `pool.len()` times.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::RecipeId;

const COST_EPSILON: f64 = 1e-9;

/// A recipe id paired with its cost in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostedRecipe {
    pub recipe_id: RecipeId,
    pub cost: f64,
}

impl CostedRecipe {
    pub fn new(recipe_id: RecipeId, cost: f64) -> Self {
        Self { recipe_id, cost }
    }
}

/// One substitution made during repair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    /// Plan position that changed
    pub slot: usize,
    pub removed: CostedRecipe,
    pub added: CostedRecipe,
}

impl Swap {
    /// Dollars saved by this swap
    pub fn saving(&self) -> f64 {
        self.removed.cost - self.added.cost
    }
}

/// Result of a repair run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairOutcome {
    pub plan: Vec<CostedRecipe>,
    pub swaps: Vec<Swap>,
    pub final_cost: f64,
    pub within_budget: bool,
}

impl RepairOutcome {
    pub fn recipe_ids(&self) -> Vec<RecipeId> {
        self.plan.iter().map(|r| r.recipe_id).collect()
    }
}

/// Brings a plan under a budget by cheaper substitutions
#[derive(Debug, Clone, Copy)]
pub struct BudgetRepair {
    budget: f64,
}

impl BudgetRepair {
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Repair `plan` using recipes from `pool`
    pub fn repair(&self, plan: Vec<CostedRecipe>, pool: &[CostedRecipe]) -> RepairOutcome {
        let mut plan = plan;
        let mut current: f64 = plan.iter().map(|r| r.cost).sum();
        let mut swaps = Vec::new();
        let mut used: HashSet<RecipeId> = HashSet::new();

        while current > self.budget + COST_EPSILON {
            let Some((slot, priciest)) = most_expensive(&plan) else {
                break;
            };
            if priciest.cost <= 0.0 {
                break;
            }

            let in_plan: HashSet<RecipeId> = plan.iter().map(|r| r.recipe_id).collect();
            let replacement = pool
                .iter()
                .filter(|r| !in_plan.contains(&r.recipe_id) && !used.contains(&r.recipe_id))
                .filter(|r| r.cost < priciest.cost - COST_EPSILON)
                .fold(None::<&CostedRecipe>, |best, r| match best {
                    Some(b) if b.cost <= r.cost => Some(b),
                    _ => Some(r),
                });

            let Some(replacement) = replacement.copied() else {
                tracing::info!(
                    cost = current,
                    budget = self.budget,
                    "no cheaper substitute left; plan stays over budget"
                );
                break;
            };

            tracing::debug!(
                slot,
                removed = %priciest.recipe_id,
                added = %replacement.recipe_id,
                saving = priciest.cost - replacement.cost,
                "budget repair swap"
            );
            plan[slot] = replacement;
            used.insert(replacement.recipe_id);
            current = plan.iter().map(|r| r.cost).sum();
            swaps.push(Swap {
                slot,
                removed: priciest,
                added: replacement,
            });
        }

        RepairOutcome {
            within_budget: current <= self.budget + COST_EPSILON,
            plan,
            swaps,
            final_cost: current,
        }
    }
}

fn most_expensive(plan: &[CostedRecipe]) -> Option<(usize, CostedRecipe)> {
    plan.iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, r)| match best {
            Some((_, b)) if b.cost >= r.cost => best,
            _ => Some((i, r)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costed(cost: f64) -> CostedRecipe {
        CostedRecipe::new(RecipeId::new(), cost)
    }

    #[test]
    fn test_single_swap_brings_plan_under_budget() {
        let plan = vec![costed(35.0), costed(30.0), costed(30.0), costed(25.0)];
        let cheap = costed(15.0);
        let pool = vec![costed(40.0), cheap, costed(20.0)];

        let outcome = BudgetRepair::new(100.0).repair(plan.clone(), &pool);

        assert!(outcome.within_budget);
        assert_eq!(outcome.swaps.len(), 1);
        assert_eq!(outcome.swaps[0].slot, 0);
        assert_eq!(outcome.swaps[0].added, cheap);
        assert!((outcome.final_cost - 100.0).abs() < 1e-9);
        assert_eq!(outcome.plan[0], cheap);
        assert_eq!(outcome.plan[1..], plan[1..]);
    }

    #[test]
    fn test_already_within_budget_untouched() {
        let plan = vec![costed(10.0), costed(12.0)];
        let outcome = BudgetRepair::new(50.0).repair(plan.clone(), &[costed(1.0)]);
        assert!(outcome.within_budget);
        assert!(outcome.swaps.is_empty());
        assert_eq!(outcome.plan, plan);
    }

    #[test]
    fn test_infeasible_returns_best_effort() {
        let plan = vec![costed(30.0), costed(30.0)];
        let pool = vec![costed(25.0), costed(28.0)];

        let outcome = BudgetRepair::new(20.0).repair(plan, &pool);

        assert!(!outcome.within_budget);
        assert_eq!(outcome.swaps.len(), 2);
        assert!((outcome.final_cost - 53.0).abs() < 1e-9);
    }

    #[test]
    fn test_terminates_and_cost_decreases_monotonically() {
        let plan: Vec<CostedRecipe> = (0..5).map(|i| costed(50.0 + f64::from(i))).collect();
        let pool: Vec<CostedRecipe> = (0..20).map(|i| costed(f64::from(i) * 2.5)).collect();

        let outcome = BudgetRepair::new(1.0).repair(plan.clone(), &pool);

        assert!(outcome.swaps.len() <= pool.len());
        let mut cost: f64 = plan.iter().map(|r| r.cost).sum();
        for swap in &outcome.swaps {
            assert!(swap.saving() > 0.0);
            let next = cost - swap.saving();
            assert!(next < cost);
            cost = next;
        }
        assert!((cost - outcome.final_cost).abs() < 1e-6);
    }

    #[test]
    fn test_pool_members_used_once_and_plan_members_skipped() {
        let shared = costed(5.0);
        let plan = vec![costed(40.0), shared];
        let pool = vec![shared, costed(10.0)];

        let outcome = BudgetRepair::new(10.0).repair(plan, &pool);

        let ids = outcome.recipe_ids();
        let unique: HashSet<RecipeId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(outcome.swaps.len(), 1);
        assert!(!outcome.within_budget);
    }

    #[test]
    fn test_zero_cost_plan_stops() {
        let plan = vec![costed(0.0)];
        let outcome = BudgetRepair::new(-1.0).repair(plan, &[costed(0.0)]);
        assert!(outcome.swaps.is_empty());
        assert!(!outcome.within_budget);
    }
}
