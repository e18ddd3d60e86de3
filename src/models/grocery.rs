//! Consolidated grocery items and pantry stock

use serde::{Deserialize, Serialize};

use super::ids::{IngredientId, RecipeId};
use super::ingredient::StoreCategory;

/// Which pricing rule produced a cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingMethod {
    /// Whole packages, needed unit already matched the package unit
    Package,
    /// Whole packages after converting into the package unit
    ConvertedPackage,
    /// Continuous per-base-unit pricing
    BaseUnit,
    /// Could not relate the quantity to the package; priced as one package
    SinglePackage,
    /// Nothing needed to be bought
    NotNeeded,
    /// No usable price; reported as unknown
    Unknown,
}

/// One line of the shopping list after consolidation and pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedGroceryItem {
    /// Ingredient being bought
    pub ingredient_id: IngredientId,

    /// Ingredient display name
    pub name: String,

    /// Store aisle
    pub category: StoreCategory,

    /// Total quantity still needed, in `unit`
    pub quantity: f64,

    /// Unit of `quantity`: canonical symbol, or the raw text when unrecognized
    pub unit: Option<String>,

    /// Whole packages to buy, when priced by package
    pub packages: Option<u32>,

    /// Package description, e.g. "16 oz"
    pub package_label: Option<String>,

    /// Estimated cost in dollars, unrounded
    pub cost: f64,

    /// Rule that produced `cost`
    pub method: PricingMethod,

    /// True when the price is unknown
    pub flagged: bool,

    /// Recipes that contributed, in plan order
    pub sources: Vec<RecipeId>,

    /// Quantity covered by pantry stock, in `unit`
    #[serde(default)]
    pub pantry_quantity: f64,
}

impl ConsolidatedGroceryItem {
    /// Whether this ingredient needs no purchase at all
    pub fn is_covered(&self) -> bool {
        self.quantity <= 0.0 && self.pantry_quantity > 0.0
    }
}

/// Ingredient stock already on hand
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryItem {
    /// Ingredient in the pricing table
    pub ingredient_id: IngredientId,

    /// Amount on hand
    pub quantity: f64,

    /// Unit spelling of `quantity`
    #[serde(default)]
    pub unit: Option<String>,
}

impl PantryItem {
    /// Create a pantry entry
    pub fn new(ingredient_id: IngredientId, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            ingredient_id,
            quantity,
            unit: Some(unit.into()),
        }
    }
}
