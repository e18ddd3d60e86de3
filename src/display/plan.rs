//! Meal plan display formatting

use std::collections::HashMap;

use super::grocery::format_grocery_list;
use crate::models::{format_quantity, Money, RecipeId, SlotAssignment};
use crate::services::PlanOutcome;

/// Format a finished plan: schedule, costs, notes and grocery list
pub fn format_plan(outcome: &PlanOutcome, currency_symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(currency_symbol);
    let costs: HashMap<RecipeId, (&str, f64)> = outcome
        .recipes
        .iter()
        .map(|r| (r.recipe_id, (r.name.as_str(), r.total)))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "Meal plan {} ({} dinners)\n\n",
        outcome.id,
        outcome.recipes.len()
    ));

    if outcome.slots.is_empty() {
        output.push_str("  No recipes could be selected.\n");
    }
    for slot in &outcome.slots {
        let day = slot.weekday_name(0);
        match slot.assignment {
            SlotAssignment::Cook(id) => {
                let (name, cost) = costs.get(&id).copied().unwrap_or(("Unknown recipe", 0.0));
                output.push_str(&format!(
                    "  {:<10} {:<36} {:>10}\n",
                    day,
                    name,
                    money(Money::from_dollars_rounded(cost))
                ));
            }
            SlotAssignment::Leftover => {
                output.push_str(&format!("  {:<10} Leftovers\n", day));
            }
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Recipes priced separately: {}\n",
        money(outcome.independent_total)
    ));
    let savings = outcome.consolidation_savings();
    if savings.cents() > 0 {
        output.push_str(&format!(
            "Consolidated cost:         {} (saves {})\n",
            money(outcome.plan_cost),
            money(savings)
        ));
    } else {
        output.push_str(&format!(
            "Consolidated cost:         {}\n",
            money(outcome.plan_cost)
        ));
    }
    if let Some(budget) = outcome.budget {
        let status = if outcome.within_budget {
            "within budget"
        } else {
            "OVER BUDGET"
        };
        output.push_str(&format!(
            "Budget:                    {} ({})\n",
            money(budget),
            status
        ));
    }

    let mut notes = Vec::new();
    if outcome.shortfall > 0 {
        notes.push(format!(
            "Only {} of {} dinners could be planned",
            outcome.requested - outcome.shortfall,
            outcome.requested
        ));
    }
    if outcome.relaxed_rotation {
        notes.push("Protein rotation was relaxed to fill the plan".to_string());
    }
    for swap in &outcome.swaps {
        let removed = costs
            .get(&swap.removed.recipe_id)
            .map(|(n, _)| n.to_string())
            .unwrap_or_else(|| swap.removed.recipe_id.to_string());
        let added = costs
            .get(&swap.added.recipe_id)
            .map(|(n, _)| n.to_string())
            .unwrap_or_else(|| swap.added.recipe_id.to_string());
        notes.push(format!(
            "Swapped out {} for {} to save {}",
            removed,
            added,
            money(Money::from_dollars_rounded(swap.saving()))
        ));
    }
    if !notes.is_empty() {
        output.push('\n');
        for note in notes {
            output.push_str(&format!("Note: {}\n", note));
        }
    }

    if !outcome.already_have.is_empty() {
        output.push_str("\nAlready in the pantry:\n");
        for item in &outcome.already_have {
            let unit = item.unit.as_deref().unwrap_or("");
            output.push_str(&format!(
                "  {} {} {}\n",
                format_quantity(item.pantry_quantity),
                unit,
                item.name
            ));
        }
    }
    if !outcome.pantry_savings.is_zero() {
        output.push_str(&format!(
            "Pantry savings: {}\n",
            money(outcome.pantry_savings)
        ));
    }

    output.push_str("\nGrocery list\n\n");
    output.push_str(&format_grocery_list(&outcome.grocery, currency_symbol));
    output
}
