//! Custom error types for mealplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The planning engine itself never fails on
//! malformed domain data (unknown units, missing prices); those surface as
//! flagged values instead. These errors cover the plumbing around it: files,
//! settings, lookups and exports.

use thiserror::Error;

use crate::models::unit::UnitError;

/// The main error type for mealplan operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Unit parsing or conversion errors (only raised by explicit conversions)
    #[error("Unit error: {0}")]
    Unit(String),
}

impl PlannerError {
    /// Create a "not found" error for recipes
    pub fn recipe_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Recipe",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for ingredients
    pub fn ingredient_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Ingredient",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for PlannerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for PlannerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<UnitError> for PlannerError {
    fn from(err: UnitError) -> Self {
        Self::Unit(err.to_string())
    }
}

/// Result type alias for mealplan operations
pub type PlannerResult<T> = Result<T, PlannerError>;
