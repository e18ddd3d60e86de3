//! Measurement units and conversions
//!
//! Recipes and store packages spell units every which way ("lbs", "Pound",
//! "tbsp.", "fluid ounces"). [`normalize`] maps those spellings onto one
//! canonical [`Unit`] per measurement, and [`convert`] moves quantities between
//! units of the same [`Dimension`] using fixed base-unit factors.
//!
//! Conversion across dimensions (a cup of flour into grams) would need a
//! density table and is deliberately refused with [`UnitError::Incompatible`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Conversion family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Base unit: grams
    Weight,
    /// Base unit: milliliters
    Volume,
    /// Base unit: each
    Count,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Weight => write!(f, "weight"),
            Dimension::Volume => write!(f, "volume"),
            Dimension::Count => write!(f, "count"),
        }
    }
}

/// A canonical measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Milliliter,
    Liter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    Each,
    Dozen,
}

impl Unit {
    /// Every canonical unit, grouped by dimension
    pub const ALL: [Unit; 15] = [
        Unit::Gram,
        Unit::Kilogram,
        Unit::Ounce,
        Unit::Pound,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::FluidOunce,
        Unit::Cup,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::Each,
        Unit::Dozen,
    ];

    /// Canonical symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Pint => "pt",
            Unit::Quart => "qt",
            Unit::Gallon => "gal",
            Unit::Each => "each",
            Unit::Dozen => "dozen",
        }
    }

    /// Dimension class of this unit
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => Dimension::Weight,
            Unit::Milliliter
            | Unit::Liter
            | Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon => Dimension::Volume,
            Unit::Each | Unit::Dozen => Dimension::Count,
        }
    }

    /// How many base units (g, ml, each) one of this unit holds
    pub fn base_factor(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 28.349_523_125,
            Unit::Pound => 453.592_37,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Teaspoon => 4.928_921_593_75,
            Unit::Tablespoon => 14.786_764_781_25,
            Unit::FluidOunce => 29.573_529_562_5,
            Unit::Cup => 236.588_236_5,
            Unit::Pint => 473.176_473,
            Unit::Quart => 946.352_946,
            Unit::Gallon => 3_785.411_784,
            Unit::Each => 1.0,
            Unit::Dozen => 12.0,
        }
    }

    /// Convert a quantity of this unit into `target`
    pub fn convert(self, quantity: f64, target: Unit) -> Result<f64, UnitError> {
        if self == target {
            return Ok(quantity);
        }
        if self.dimension() != target.dimension() {
            return Err(UnitError::Incompatible {
                from: self,
                to: target,
            });
        }
        Ok(quantity * self.base_factor() / target.base_factor())
    }

    /// Whether `other` shares this unit's dimension
    pub fn is_compatible(&self, other: Unit) -> bool {
        self.dimension() == other.dimension()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}

/// Unit lookup and conversion failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// The text is not a spelling of any known unit
    #[error("Unrecognized unit: {0}")]
    Unrecognized(String),

    /// Both units are known but measure different things
    #[error("Cannot convert {from} ({}) to {to} ({})", .from.dimension(), .to.dimension())]
    Incompatible { from: Unit, to: Unit },
}

/// Map a unit spelling to its canonical unit
///
/// Case, surrounding whitespace, repeated inner whitespace and periods are
/// ignored, so "Fl. Oz" and "fl oz" are the same unit. A bare "oz" is always
/// a weight ounce.
pub fn normalize(text: &str) -> Result<Unit, UnitError> {
    let cleaned = text
        .to_lowercase()
        .replace('.', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let unit = match cleaned.as_str() {
        "g" | "gr" | "gram" | "grams" => Unit::Gram,
        "kg" | "kgs" | "kilogram" | "kilograms" => Unit::Kilogram,
        "oz" | "ozs" | "ounce" | "ounces" => Unit::Ounce,
        "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
        "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
            Unit::Milliliter
        }
        "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
        "tsp" | "tsps" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
        "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Unit::FluidOunce,
        "cup" | "cups" | "c" => Unit::Cup,
        "pt" | "pint" | "pints" => Unit::Pint,
        "qt" | "quart" | "quarts" => Unit::Quart,
        "gal" | "gallon" | "gallons" => Unit::Gallon,
        "each" | "ea" | "piece" | "pieces" | "item" | "items" | "count" | "ct" | "whole"
        | "unit" | "units" => Unit::Each,
        "dozen" | "doz" => Unit::Dozen,
        _ => return Err(UnitError::Unrecognized(text.trim().to_string())),
    };

    Ok(unit)
}

/// A unit as written, resolved to its canonical form when possible
///
/// Unrecognized spellings ("can", "clove", "glug") are kept as lowercase text
/// so that two lines both measured in "cans" can still be matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKey {
    Known(Unit),
    Raw(String),
}

impl UnitKey {
    /// Resolve a unit spelling; blank or missing text yields `None`
    pub fn from_text(text: Option<&str>) -> Option<Self> {
        let text = text?.trim();
        if text.is_empty() {
            return None;
        }
        Some(match normalize(text) {
            Ok(unit) => UnitKey::Known(unit),
            Err(_) => UnitKey::Raw(text.to_lowercase()),
        })
    }

    /// The canonical unit, if recognized
    pub fn unit(&self) -> Option<Unit> {
        match self {
            UnitKey::Known(unit) => Some(*unit),
            UnitKey::Raw(_) => None,
        }
    }

    /// Convert a quantity into `target`
    ///
    /// Identical keys convert trivially, even when unrecognized.
    pub fn convert(&self, quantity: f64, target: &UnitKey) -> Option<f64> {
        if self == target {
            return Some(quantity);
        }
        match (self, target) {
            (UnitKey::Known(from), UnitKey::Known(to)) => from.convert(quantity, *to).ok(),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            UnitKey::Known(unit) => unit.symbol(),
            UnitKey::Raw(text) => text,
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a quantity between two unit spellings
///
/// Both spellings must normalize and share a dimension.
pub fn convert(quantity: f64, from: &str, to: &str) -> Result<f64, UnitError> {
    let from = normalize(from)?;
    let to = normalize(to)?;
    from.convert(quantity, to)
}
