//! Recipe models
//!
//! A recipe is an ordered list of ingredient lines plus the metadata the meal
//! selector scores on (protein category, rating, tags). Catalog exports may
//! carry a precomputed `totalCost` instead of, or alongside, the lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IngredientId, RecipeId};

/// One ingredient requirement within a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    /// Ingredient in the pricing table
    pub ingredient_id: IngredientId,

    /// Amount needed
    pub quantity: f64,

    /// Unit spelling as written in the recipe
    #[serde(default)]
    pub unit: Option<String>,

    /// Garnishes and "to taste" extras
    #[serde(default)]
    pub optional: bool,
}

impl RecipeLine {
    /// Create a required line
    pub fn new(ingredient_id: IngredientId, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            ingredient_id,
            quantity,
            unit: Some(unit.into()),
            optional: false,
        }
    }

    /// Mark the line optional (builder style)
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether the line should be bought and priced
    pub fn is_costed(&self, include_optional: bool) -> bool {
        !self.optional || include_optional
    }
}

/// A recipe in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique identifier
    pub id: RecipeId,

    /// Recipe name
    pub name: String,

    /// Main protein, used for rotation ("Chicken", "Beef", ...)
    #[serde(default)]
    pub protein_category: Option<String>,

    /// Average user rating (0-5)
    #[serde(default)]
    pub rating: Option<f64>,

    /// Free-form tags matched against preferences
    #[serde(default)]
    pub tags: Vec<String>,

    /// Number of servings the recipe yields
    #[serde(default = "default_servings")]
    pub servings: u32,

    /// Ingredient lines in recipe order
    #[serde(default)]
    pub ingredients: Vec<RecipeLine>,

    /// Precomputed cost from the catalog, used when there are no lines
    #[serde(default)]
    pub total_cost: Option<f64>,
}

fn default_servings() -> u32 {
    4
}

impl Recipe {
    /// Create a new recipe
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecipeId::new(),
            name: name.into(),
            protein_category: None,
            rating: None,
            tags: Vec::new(),
            servings: default_servings(),
            ingredients: Vec::new(),
            total_cost: None,
        }
    }

    /// Set the protein category (builder style)
    pub fn with_protein(mut self, protein: impl Into<String>) -> Self {
        self.protein_category = Some(protein.into());
        self
    }

    /// Set the rating (builder style)
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Add a tag (builder style)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add an ingredient line (builder style)
    pub fn with_line(mut self, line: RecipeLine) -> Self {
        self.ingredients.push(line);
        self
    }

    /// Set the catalog-supplied total cost (builder style)
    pub fn with_total_cost(mut self, cost: f64) -> Self {
        self.total_cost = Some(cost);
        self
    }

    /// Protein category key for rotation, if any
    ///
    /// Categories compare case-insensitively; blank categories and "other"
    /// do not take part in rotation.
    pub fn rotation_key(&self) -> Option<String> {
        let key = self.protein_category.as_deref()?.trim().to_lowercase();
        if key.is_empty() || key == "other" {
            None
        } else {
            Some(key)
        }
    }

    /// Whether any tag or the protein category matches one of `terms`
    pub fn matches_any(&self, terms: &[String]) -> bool {
        terms.iter().any(|term| {
            let term = term.trim();
            !term.is_empty()
                && (self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(term))
                    || self
                        .protein_category
                        .as_deref()
                        .is_some_and(|p| p.trim().eq_ignore_ascii_case(term)))
        })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_key() {
        assert_eq!(
            Recipe::new("Tacos").with_protein(" Chicken ").rotation_key(),
            Some("chicken".to_string())
        );
        assert_eq!(Recipe::new("Salad").rotation_key(), None);
        assert_eq!(Recipe::new("Soup").with_protein("Other").rotation_key(), None);
    }

    #[test]
    fn test_matches_any() {
        let recipe = Recipe::new("Chili")
            .with_protein("Beef")
            .with_tag("spicy")
            .with_tag("comfort");
        assert!(recipe.matches_any(&["Spicy".to_string()]));
        assert!(recipe.matches_any(&["beef".to_string()]));
        assert!(!recipe.matches_any(&["vegetarian".to_string()]));
        assert!(!recipe.matches_any(&["".to_string()]));
    }

    #[test]
    fn test_optional_line() {
        let line = RecipeLine::new(IngredientId::new(), 1.0, "tbsp").optional();
        assert!(!line.is_costed(false));
        assert!(line.is_costed(true));
    }

    #[test]
    fn test_deserialize_catalog_entry() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
            "name": "Sheet Pan Chicken",
            "proteinCategory": "Chicken",
            "rating": 4.6,
            "tags": ["quick"],
            "totalCost": 11.25
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.servings, 4);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.total_cost, Some(11.25));
    }
}
