//! Recipe and plan cost aggregation
//!
//! Prices a single recipe line by line, and prices a whole plan by first
//! consolidating every line across the selected recipes. Consolidation sums
//! the quantities of the same ingredient before quantizing to packages, so two
//! dinners that each need half a package buy one package between them.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{
    Catalog, ConsolidatedGroceryItem, IngredientId, PantryItem, PricingMethod, Recipe, RecipeId,
    StoreCategory, UnitKey,
};
use crate::services::pricing::{self, LineCost};

/// Leftover need this small after pantry deduction is conversion noise
const COVER_SNAP: f64 = 1e-9;

/// Cost of one recipe line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub optional: bool,
    pub cost: LineCost,
}

/// Cost of one recipe priced on its own
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCost {
    pub recipe_id: RecipeId,
    pub name: String,
    pub servings: u32,
    pub lines: Vec<LineBreakdown>,
    /// Total in dollars, unrounded
    pub total: f64,
    /// Lines whose price is unknown
    pub flagged_lines: usize,
}

impl RecipeCost {
    /// Total divided across servings
    pub fn per_serving(&self) -> f64 {
        if self.servings == 0 {
            self.total
        } else {
            self.total / f64::from(self.servings)
        }
    }
}

/// Grocery items after pantry stock has been deducted
#[derive(Debug, Clone, Default)]
pub struct PantryOutcome {
    /// Items that still need buying, repriced for the remainder
    pub to_buy: Vec<ConsolidatedGroceryItem>,
    /// Items fully covered by the pantry
    pub already_have: Vec<ConsolidatedGroceryItem>,
    /// Value of pantry stock used, in dollars
    pub savings: f64,
}

/// Service that prices recipes and plans against a catalog
pub struct CostAggregator<'a> {
    catalog: &'a Catalog,
    include_optional: bool,
}

impl<'a> CostAggregator<'a> {
    /// Create a new aggregator; optional lines are left out
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            include_optional: false,
        }
    }

    /// Choose whether optional lines are bought
    pub fn with_optional(mut self, include_optional: bool) -> Self {
        self.include_optional = include_optional;
        self
    }

    /// Price a recipe on its own
    ///
    /// A recipe without lines uses its catalog-supplied total, if any.
    pub fn recipe_cost(&self, recipe: &Recipe) -> RecipeCost {
        let mut lines = Vec::with_capacity(recipe.ingredients.len());

        for line in &recipe.ingredients {
            let (name, cost) = match self.catalog.ingredient(line.ingredient_id) {
                Some(ingredient) => {
                    let cost = if line.is_costed(self.include_optional) {
                        pricing::cost(ingredient, line.quantity, line.unit.as_deref())
                    } else {
                        LineCost::not_needed()
                    };
                    (ingredient.name.clone(), cost)
                }
                None => {
                    tracing::warn!(
                        recipe = %recipe.name,
                        ingredient = %line.ingredient_id,
                        "recipe references an ingredient missing from the pricing table"
                    );
                    (unknown_name(line.ingredient_id), LineCost::unknown())
                }
            };

            lines.push(LineBreakdown {
                ingredient_id: line.ingredient_id,
                name,
                quantity: line.quantity,
                unit: line.unit.clone(),
                optional: line.optional,
                cost,
            });
        }

        let total = if lines.is_empty() {
            recipe
                .total_cost
                .filter(|c| c.is_finite() && *c >= 0.0)
                .unwrap_or(0.0)
        } else {
            lines.iter().map(|l| l.cost.amount).sum()
        };

        RecipeCost {
            recipe_id: recipe.id,
            name: recipe.name.clone(),
            servings: recipe.servings,
            flagged_lines: lines.iter().filter(|l| l.cost.flagged).count(),
            lines,
            total,
        }
    }

    /// Sum of recipes priced independently
    pub fn independent_total(&self, recipes: &[&Recipe]) -> f64 {
        recipes.iter().map(|r| self.recipe_cost(r).total).sum()
    }

    /// Consolidate and price every line across `recipes`
    ///
    /// Each line is converted into its ingredient's package unit when
    /// possible, then lines are grouped by ingredient and unit. Each group is
    /// priced once. Catalog-total recipes without lines contribute nothing
    /// here; see [`CostAggregator::plan_total`].
    pub fn consolidate(&self, recipes: &[&Recipe]) -> Vec<ConsolidatedGroceryItem> {
        let mut groups: Vec<Group> = Vec::new();
        let mut index: HashMap<(IngredientId, Option<UnitKey>), usize> = HashMap::new();

        for recipe in recipes {
            for line in &recipe.ingredients {
                if !line.is_costed(self.include_optional) {
                    continue;
                }
                if !line.quantity.is_finite() || line.quantity <= 0.0 {
                    continue;
                }

                let line_key = UnitKey::from_text(line.unit.as_deref());
                let package_key = self
                    .catalog
                    .ingredient(line.ingredient_id)
                    .and_then(|i| UnitKey::from_text(i.package_unit.as_deref()));

                let (key, quantity) = match (&line_key, &package_key) {
                    (Some(from), Some(to)) => match from.convert(line.quantity, to) {
                        Some(converted) => (Some(to.clone()), converted),
                        None => (line_key.clone(), line.quantity),
                    },
                    _ => (line_key.clone(), line.quantity),
                };

                let slot = *index
                    .entry((line.ingredient_id, key.clone()))
                    .or_insert_with(|| {
                        groups.push(Group {
                            ingredient_id: line.ingredient_id,
                            unit: key.clone(),
                            quantity: 0.0,
                            snapped: false,
                            sources: Vec::new(),
                        });
                        groups.len() - 1
                    });

                let group = &mut groups[slot];
                // Converted or summed amounts are not exact
                group.snapped |= key != line_key || group.quantity > 0.0;
                group.quantity += quantity;
                if !group.sources.contains(&recipe.id) {
                    group.sources.push(recipe.id);
                }
            }
        }

        groups
            .into_iter()
            .map(|g| self.price_group(g.ingredient_id, g.unit, g.quantity, g.snapped, g.sources, 0.0))
            .collect()
    }

    /// Consolidated cost of a plan
    ///
    /// Recipes priced only by a catalog total add that total on top of the
    /// consolidated ingredient cost.
    pub fn plan_total(&self, recipes: &[&Recipe], items: &[ConsolidatedGroceryItem]) -> f64 {
        let lineless: f64 = recipes
            .iter()
            .filter(|r| r.ingredients.is_empty())
            .map(|r| self.recipe_cost(r).total)
            .sum();
        lineless + items.iter().map(|i| i.cost).sum::<f64>()
    }

    /// Deduct pantry stock from consolidated items
    ///
    /// Pantry quantities are converted into each item's unit. Fully covered
    /// items move to `already_have`; partially covered ones are repriced for
    /// the remainder.
    pub fn apply_pantry(
        &self,
        items: Vec<ConsolidatedGroceryItem>,
        pantry: &[PantryItem],
    ) -> PantryOutcome {
        let mut remaining: Vec<f64> = pantry
            .iter()
            .map(|p| if p.quantity.is_finite() { p.quantity.max(0.0) } else { 0.0 })
            .collect();
        let mut outcome = PantryOutcome::default();

        for item in items {
            let item_key = item.unit.as_deref().and_then(|u| UnitKey::from_text(Some(u)));
            let mut used = 0.0;

            for (stock, left) in pantry.iter().zip(remaining.iter_mut()) {
                if stock.ingredient_id != item.ingredient_id || *left <= 0.0 {
                    continue;
                }
                let stock_key = UnitKey::from_text(stock.unit.as_deref());
                let available = match (&stock_key, &item_key) {
                    (None, None) => Some(*left),
                    (Some(from), Some(to)) => from.convert(*left, to),
                    _ => None,
                };
                let Some(available) = available else {
                    continue;
                };

                let wanted = item.quantity - used;
                if wanted <= 0.0 {
                    break;
                }
                let take = available.min(wanted);
                used += take;
                // Return the unused part of this stock in its own unit
                *left = if available > 0.0 {
                    *left * (1.0 - take / available)
                } else {
                    0.0
                };
            }

            if used <= 0.0 {
                outcome.to_buy.push(item);
                continue;
            }

            outcome.savings += self.pantry_value(item.ingredient_id, item_key.as_ref(), used);
            let mut still_needed = (item.quantity - used).max(0.0);
            if still_needed <= COVER_SNAP * item.quantity.max(1.0) {
                still_needed = 0.0;
            }
            let repriced = self.price_group(
                item.ingredient_id,
                item_key,
                still_needed,
                true,
                item.sources,
                used,
            );

            if still_needed <= 0.0 {
                outcome.already_have.push(repriced);
            } else {
                outcome.to_buy.push(repriced);
            }
        }

        outcome
    }

    fn pantry_value(&self, ingredient_id: IngredientId, unit: Option<&UnitKey>, used: f64) -> f64 {
        let Some(ingredient) = self.catalog.ingredient(ingredient_id) else {
            return 0.0;
        };
        let Some(base_price) = ingredient.base_price() else {
            return 0.0;
        };
        let base_key = UnitKey::from_text(ingredient.base_unit.as_deref());
        let in_base = match (unit, base_key.as_ref()) {
            (None, _) => Some(used),
            (Some(from), Some(to)) => from.convert(used, to),
            (Some(_), None) => None,
        };
        in_base.map_or(0.0, |q| q * base_price)
    }

    fn price_group(
        &self,
        ingredient_id: IngredientId,
        unit: Option<UnitKey>,
        quantity: f64,
        snapped: bool,
        sources: Vec<RecipeId>,
        pantry_quantity: f64,
    ) -> ConsolidatedGroceryItem {
        let unit_text = unit.as_ref().map(|u| u.label().to_string());

        match self.catalog.ingredient(ingredient_id) {
            Some(ingredient) => {
                let cost = if snapped {
                    pricing::cost_snapped(ingredient, quantity, unit_text.as_deref())
                } else {
                    pricing::cost(ingredient, quantity, unit_text.as_deref())
                };
                if cost.flagged {
                    tracing::info!(ingredient = %ingredient.name, "grocery item has no known price");
                }
                ConsolidatedGroceryItem {
                    ingredient_id,
                    name: ingredient.name.clone(),
                    category: ingredient.category.clone(),
                    quantity,
                    unit: unit_text,
                    packages: cost.packages,
                    package_label: ingredient.package_label(),
                    cost: cost.amount,
                    method: cost.method,
                    flagged: cost.flagged,
                    sources,
                    pantry_quantity,
                }
            }
            None => {
                let flagged = quantity > 0.0;
                ConsolidatedGroceryItem {
                    ingredient_id,
                    name: unknown_name(ingredient_id),
                    category: StoreCategory::default(),
                    quantity,
                    unit: unit_text,
                    packages: None,
                    package_label: None,
                    cost: 0.0,
                    method: if flagged {
                        PricingMethod::Unknown
                    } else {
                        PricingMethod::NotNeeded
                    },
                    flagged,
                    sources,
                    pantry_quantity,
                }
            }
        }
    }
}

struct Group {
    ingredient_id: IngredientId,
    unit: Option<UnitKey>,
    quantity: f64,
    snapped: bool,
    sources: Vec<RecipeId>,
}

fn unknown_name(id: IngredientId) -> String {
    format!("Unknown ingredient ({})", id)
}
