//! Storage layer for mealplan
//!
//! Loads the recipe catalog, pricing table, pantry and preferences from JSON
//! files in the data directory. The planning engine never touches the disk;
//! the CLI loads everything here first and hands the services plain values.
//! [`DataStore::initialize`] lays out a fresh data directory with empty files.

pub mod file_io;

pub use file_io::{append_json_line, read_json, read_json_lines, read_json_required, write_json_atomic};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths::PlannerPaths;
use crate::config::Settings;
use crate::error::PlannerError;
use crate::models::{Catalog, Ingredient, PantryItem, Preferences, Recipe};

/// On-disk shape of recipes.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecipeData {
    recipes: Vec<Recipe>,
}

/// On-disk shape of ingredients.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IngredientData {
    ingredients: Vec<Ingredient>,
}

/// On-disk shape of pantry.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PantryData {
    items: Vec<PantryItem>,
}

/// Reads and writes the catalog files
pub struct DataStore {
    paths: PlannerPaths,
}

impl DataStore {
    pub fn new(paths: PlannerPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PlannerPaths {
        &self.paths
    }

    /// Load recipes; the file must exist
    pub fn load_recipes(&self) -> Result<Vec<Recipe>, PlannerError> {
        let data: RecipeData = read_json_required(self.paths.recipes_file())?;
        Ok(data.recipes)
    }

    /// Load the pricing table; the file must exist
    ///
    /// Ingredients that fail validation are kept (the cost model reports
    /// them as unknown) but logged.
    pub fn load_ingredients(&self) -> Result<Vec<Ingredient>, PlannerError> {
        let data: IngredientData = read_json_required(self.paths.ingredients_file())?;
        for ingredient in &data.ingredients {
            if let Err(e) = ingredient.validate() {
                tracing::warn!(ingredient = %ingredient.name, "{}", e);
            }
        }
        Ok(data.ingredients)
    }

    /// Load recipes and ingredients into a catalog
    pub fn load_catalog(&self) -> Result<Catalog, PlannerError> {
        let recipes = self.load_recipes()?;
        let ingredients = self.load_ingredients()?;
        tracing::debug!(
            recipes = recipes.len(),
            ingredients = ingredients.len(),
            "catalog loaded"
        );
        Ok(Catalog::new(recipes, ingredients))
    }

    /// Load pantry stock; a missing file means an empty pantry
    pub fn load_pantry(&self) -> Result<Vec<PantryItem>, PlannerError> {
        let data: PantryData = read_json(self.paths.pantry_file())?;
        Ok(data.items)
    }

    /// Load preferences; a missing file means no preferences
    pub fn load_preferences(&self) -> Result<Preferences, PlannerError> {
        read_json(self.paths.preferences_file())
    }

    /// Create the directories and any missing files for a fresh install
    ///
    /// Existing files are never overwritten. Returns the files created.
    pub fn initialize(&self, settings: &Settings) -> Result<Vec<PathBuf>, PlannerError> {
        self.paths.ensure_directories()?;
        let mut created = Vec::new();

        if !self.paths.settings_file().exists() {
            settings.save(&self.paths)?;
            created.push(self.paths.settings_file());
        }
        if !self.paths.recipes_file().exists() {
            self.save_recipes(&[])?;
            created.push(self.paths.recipes_file());
        }
        if !self.paths.ingredients_file().exists() {
            self.save_ingredients(&[])?;
            created.push(self.paths.ingredients_file());
        }
        if !self.paths.pantry_file().exists() {
            self.save_pantry(&[])?;
            created.push(self.paths.pantry_file());
        }
        if !self.paths.preferences_file().exists() {
            self.save_preferences(&Preferences::default())?;
            created.push(self.paths.preferences_file());
        }

        tracing::debug!(created = created.len(), "data directory initialized");
        Ok(created)
    }

    pub fn save_recipes(&self, recipes: &[Recipe]) -> Result<(), PlannerError> {
        write_json_atomic(
            self.paths.recipes_file(),
            &RecipeData {
                recipes: recipes.to_vec(),
            },
        )
    }

    pub fn save_ingredients(&self, ingredients: &[Ingredient]) -> Result<(), PlannerError> {
        write_json_atomic(
            self.paths.ingredients_file(),
            &IngredientData {
                ingredients: ingredients.to_vec(),
            },
        )
    }

    pub fn save_pantry(&self, items: &[PantryItem]) -> Result<(), PlannerError> {
        write_json_atomic(
            self.paths.pantry_file(),
            &PantryData {
                items: items.to_vec(),
            },
        )
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), PlannerError> {
        write_json_atomic(self.paths.preferences_file(), preferences)
    }
}
