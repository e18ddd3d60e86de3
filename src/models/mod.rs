//! Core data models for mealplan
//!
//! This module contains the value objects the planning engine works on:
//! units, ingredients, recipes, plan slots and grocery items. All of them are
//! created per planning request and discarded afterwards.

pub mod catalog;
pub mod grocery;
pub mod ids;
pub mod ingredient;
pub mod money;
pub mod plan;
pub mod preferences;
pub mod recipe;
pub mod unit;

pub use catalog::Catalog;
pub use grocery::{ConsolidatedGroceryItem, PantryItem, PricingMethod};
pub use ids::{IngredientId, PlanId, RecipeId};
pub use ingredient::{format_quantity, Ingredient, StoreCategory};
pub use money::Money;
pub use plan::{cooking_days, schedule, MealPlanSlot, SlotAssignment};
pub use preferences::Preferences;
pub use recipe::{Recipe, RecipeLine};
pub use unit::{Dimension, Unit, UnitError, UnitKey};
