//! Recipe display formatting
//!
//! Formats recipes for terminal output in table and detail views.

use super::grocery::PRICE_UNKNOWN;
use super::truncate;
use crate::models::{format_quantity, Money, Recipe};
use crate::services::RecipeCost;

const MAX_NAME_WIDTH: usize = 40;

/// Format recipes with their independent costs as a table
pub fn format_recipe_list(rows: &[(&Recipe, RecipeCost)], currency_symbol: &str) -> String {
    if rows.is_empty() {
        return "No recipes found.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|(r, _)| r.name.chars().count().min(MAX_NAME_WIDTH))
        .max()
        .unwrap_or(4)
        .max(4);
    let protein_width = rows
        .iter()
        .map(|(r, _)| r.protein_category.as_deref().unwrap_or("-").len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<protein_width$}  {:>6}  {:>10}  {:>11}\n",
        "Name",
        "Protein",
        "Rating",
        "Cost",
        "Per Serving",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<protein_width$}  {:->6}  {:->10}  {:->11}\n",
        "", "", "", "", "",
    ));

    for (recipe, cost) in rows {
        let rating = recipe
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        let mut total = Money::from_dollars_rounded(cost.total).format_with_symbol(currency_symbol);
        if cost.flagged_lines > 0 {
            total.push('*');
        }

        output.push_str(&format!(
            "{:<name_width$}  {:<protein_width$}  {:>6}  {:>10}  {:>11}\n",
            truncate(&recipe.name, MAX_NAME_WIDTH),
            recipe.protein_category.as_deref().unwrap_or("-"),
            rating,
            total,
            Money::from_dollars_rounded(cost.per_serving()).format_with_symbol(currency_symbol),
        ));
    }

    if rows.iter().any(|(_, c)| c.flagged_lines > 0) {
        output.push_str("\n* includes ingredients with no known price\n");
    }

    output
}

/// Format a single recipe with its line-by-line cost
pub fn format_recipe_details(recipe: &Recipe, cost: &RecipeCost, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Recipe: {}\n", recipe.name));
    output.push_str(&format!("  ID:        {}\n", recipe.id));
    if let Some(protein) = &recipe.protein_category {
        output.push_str(&format!("  Protein:   {}\n", protein));
    }
    if let Some(rating) = recipe.rating {
        output.push_str(&format!("  Rating:    {:.1}\n", rating));
    }
    if !recipe.tags.is_empty() {
        output.push_str(&format!("  Tags:      {}\n", recipe.tags.join(", ")));
    }
    output.push_str(&format!("  Servings:  {}\n", recipe.servings));

    if !cost.lines.is_empty() {
        output.push_str("\nIngredients:\n");
        for line in &cost.lines {
            let amount = match line.unit.as_deref() {
                Some(unit) => format!("{} {}", format_quantity(line.quantity), unit),
                None => format_quantity(line.quantity),
            };
            let price = if line.cost.flagged {
                PRICE_UNKNOWN.to_string()
            } else {
                Money::from_dollars_rounded(line.cost.amount).format_with_symbol(currency_symbol)
            };
            let optional = if line.optional { " (optional)" } else { "" };
            output.push_str(&format!("  {} {}{}  {}\n", amount, line.name, optional, price));
        }
    }

    output.push_str(&format!(
        "\nTotal:       {}\n",
        Money::from_dollars_rounded(cost.total).format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "Per serving: {}\n",
        Money::from_dollars_rounded(cost.per_serving()).format_with_symbol(currency_symbol)
    ));
    if cost.flagged_lines > 0 {
        output.push_str(&format!(
            "{} ingredient(s) have no known price\n",
            cost.flagged_lines
        ));
    }

    output
}
