//! Export module for mealplan
//!
//! Writes plans and grocery lists in machine-readable formats:
//! - CSV: grocery lists, one row per item (spreadsheet-compatible)
//! - JSON: plans and grocery lists wrapped in a versioned envelope
//! - YAML: the same envelope, human-readable with a comment header

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_grocery_csv;
pub use json::{export_json, ExportEnvelope, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
