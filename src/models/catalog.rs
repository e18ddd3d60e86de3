//! In-memory recipe catalog and pricing table
//!
//! The catalog is built once per planning request from already-loaded data and
//! handed to the services by reference. Nothing in the engine reaches for
//! ambient state.

use std::collections::HashMap;

use super::ids::{IngredientId, RecipeId};
use super::ingredient::Ingredient;
use super::recipe::Recipe;

/// Recipes plus the ingredient pricing table they reference
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    recipe_index: HashMap<RecipeId, usize>,
    ingredients: HashMap<IngredientId, Ingredient>,
}

impl Catalog {
    /// Build a catalog; later duplicates of a recipe id are dropped
    pub fn new(recipes: Vec<Recipe>, ingredients: Vec<Ingredient>) -> Self {
        let mut catalog = Self::default();
        for recipe in recipes {
            if catalog.recipe_index.contains_key(&recipe.id) {
                tracing::warn!(recipe = %recipe.name, id = %recipe.id, "duplicate recipe id ignored");
                continue;
            }
            catalog
                .recipe_index
                .insert(recipe.id, catalog.recipes.len());
            catalog.recipes.push(recipe);
        }
        catalog.ingredients = ingredients.into_iter().map(|i| (i.id, i)).collect();
        catalog
    }

    /// All recipes in catalog order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Look up a recipe by id
    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipe_index.get(&id).map(|&i| &self.recipes[i])
    }

    /// Look up an ingredient by id
    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.get(&id)
    }

    /// All ingredients, sorted by name
    pub fn ingredients_sorted(&self) -> Vec<&Ingredient> {
        let mut list: Vec<&Ingredient> = self.ingredients.values().collect();
        list.sort_by_key(|i| i.name.to_lowercase());
        list
    }

    /// Find a recipe by id or case-insensitive name
    pub fn find_recipe(&self, query: &str) -> Option<&Recipe> {
        if let Ok(id) = query.parse::<RecipeId>() {
            if let Some(recipe) = self.recipe(id) {
                return Some(recipe);
            }
        }
        let query = query.trim();
        self.recipes
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(query))
    }

    /// Find an ingredient by id or case-insensitive name
    pub fn find_ingredient(&self, query: &str) -> Option<&Ingredient> {
        if let Ok(id) = query.parse::<IngredientId>() {
            if let Some(ingredient) = self.ingredient(id) {
                return Some(ingredient);
            }
        }
        let query = query.trim();
        self.ingredients
            .values()
            .find(|i| i.name.eq_ignore_ascii_case(query))
    }

    /// Number of recipes
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog has no recipes
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
