//! Ingredient pricing model
//!
//! An ingredient carries the retail data needed to price it: the package it
//! is sold in and, optionally, a continuous per-base-unit price. Store
//! categories group ingredients into aisles for the grocery list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ids::IngredientId;
use super::unit::{self, Unit};

/// Store aisle grouping for the grocery list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoreCategory {
    Produce,
    Meat,
    Dairy,
    Pantry,
    Frozen,
    Other(String),
}

impl StoreCategory {
    /// Display name
    pub fn name(&self) -> &str {
        match self {
            StoreCategory::Produce => "Produce",
            StoreCategory::Meat => "Meat",
            StoreCategory::Dairy => "Dairy",
            StoreCategory::Pantry => "Pantry",
            StoreCategory::Frozen => "Frozen",
            StoreCategory::Other(name) => name,
        }
    }

    /// Order categories by a preferred list, then alphabetically
    ///
    /// Categories named in `preferred` come first in that order (matched
    /// case-insensitively); everything else follows sorted by name.
    pub fn display_cmp(&self, other: &Self, preferred: &[String]) -> Ordering {
        let rank = |c: &StoreCategory| {
            preferred
                .iter()
                .position(|p| p.eq_ignore_ascii_case(c.name()))
        };

        match (rank(self), rank(other)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self
                .name()
                .to_lowercase()
                .cmp(&other.name().to_lowercase()),
        }
    }
}

impl Default for StoreCategory {
    fn default() -> Self {
        StoreCategory::Other("Other".to_string())
    }
}

impl From<String> for StoreCategory {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "produce" => StoreCategory::Produce,
            "meat" => StoreCategory::Meat,
            "dairy" => StoreCategory::Dairy,
            "pantry" => StoreCategory::Pantry,
            "frozen" => StoreCategory::Frozen,
            "" => StoreCategory::default(),
            _ => StoreCategory::Other(value.trim().to_string()),
        }
    }
}

impl From<StoreCategory> for String {
    fn from(category: StoreCategory) -> Self {
        category.name().to_string()
    }
}

impl fmt::Display for StoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ingredient and its retail pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Unique identifier
    pub id: IngredientId,

    /// Display name
    pub name: String,

    /// Store aisle
    #[serde(default)]
    pub category: StoreCategory,

    /// Price of one retail package, in dollars
    #[serde(default)]
    pub price_per_package: Option<f64>,

    /// Amount in one package, measured in `package_unit`
    #[serde(default)]
    pub package_size: Option<f64>,

    /// Unit spelling for `package_size`
    #[serde(default)]
    pub package_unit: Option<String>,

    /// Unit spelling that `price_per_base_unit` is quoted in
    #[serde(default)]
    pub base_unit: Option<String>,

    /// Continuous price per `base_unit`, used when no package applies
    #[serde(default)]
    pub price_per_base_unit: Option<f64>,
}

impl Ingredient {
    /// Create an unpriced ingredient
    pub fn new(name: impl Into<String>, category: StoreCategory) -> Self {
        Self {
            id: IngredientId::new(),
            name: name.into(),
            category,
            price_per_package: None,
            package_size: None,
            package_unit: None,
            base_unit: None,
            price_per_base_unit: None,
        }
    }

    /// Set the retail package (builder style)
    pub fn with_package(mut self, price: f64, size: f64, unit: impl Into<String>) -> Self {
        self.price_per_package = Some(price);
        self.package_size = Some(size);
        self.package_unit = Some(unit.into());
        self
    }

    /// Set the continuous per-unit price (builder style)
    pub fn with_base_price(mut self, price: f64, unit: impl Into<String>) -> Self {
        self.price_per_base_unit = Some(price);
        self.base_unit = Some(unit.into());
        self
    }

    /// Package price, if usable
    pub fn package_price(&self) -> Option<f64> {
        self.price_per_package.filter(|p| p.is_finite() && *p >= 0.0)
    }

    /// Package size, if usable (must be positive)
    pub fn package_quantity(&self) -> Option<f64> {
        self.package_size.filter(|s| s.is_finite() && *s > 0.0)
    }

    /// Per-base-unit price, if usable
    pub fn base_price(&self) -> Option<f64> {
        self.price_per_base_unit
            .filter(|p| p.is_finite() && *p >= 0.0)
    }

    /// Canonical package unit, if the spelling is recognized
    pub fn package_unit_normalized(&self) -> Option<Unit> {
        self.package_unit
            .as_deref()
            .and_then(|u| unit::normalize(u).ok())
    }

    /// Whether a package can be bought and quantized against
    pub fn has_package_pricing(&self) -> bool {
        self.package_price().is_some() && self.package_quantity().is_some()
    }

    /// Whether any pricing path exists
    pub fn is_priced(&self) -> bool {
        self.package_price().is_some() || self.base_price().is_some()
    }

    /// Short package description, e.g. "16 oz"
    pub fn package_label(&self) -> Option<String> {
        let size = self.package_quantity()?;
        let unit = self.package_unit.as_deref().unwrap_or("").trim();
        if unit.is_empty() {
            Some(format_quantity(size))
        } else {
            Some(format!("{} {}", format_quantity(size), unit))
        }
    }

    /// Validate the ingredient's pricing data
    pub fn validate(&self) -> Result<(), IngredientValidationError> {
        if self.name.trim().is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }

        for (field, value) in [
            ("pricePerPackage", self.price_per_package),
            ("packageSize", self.package_size),
            ("pricePerBaseUnit", self.price_per_base_unit),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(IngredientValidationError::InvalidNumber(field, v));
                }
            }
        }

        if let Some(unit) = self.package_unit.as_deref() {
            if unit::normalize(unit).is_err() {
                return Err(IngredientValidationError::UnknownUnit(unit.to_string()));
            }
        }

        if !self.is_priced() {
            return Err(IngredientValidationError::Unpriced);
        }

        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Format a quantity without trailing zeros ("16", "1.5", "0.333")
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Validation errors for ingredients
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientValidationError {
    EmptyName,
    InvalidNumber(&'static str, f64),
    UnknownUnit(String),
    Unpriced,
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Ingredient name cannot be empty"),
            Self::InvalidNumber(field, value) => {
                write!(f, "{} must be a non-negative number, got {}", field, value)
            }
            Self::UnknownUnit(unit) => write!(f, "Unrecognized package unit: {}", unit),
            Self::Unpriced => write!(f, "No package or base-unit price"),
        }
    }
}

impl std::error::Error for IngredientValidationError {}
