//! mealplan - Budget-constrained meal planning engine
//!
//! This library selects dinners from a recipe catalog under a grocery budget,
//! prices ingredients by the package, consolidates shared ingredients across
//! the week, and produces a grocery list grouped by store aisle.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Units, ingredients, recipes, plan slots and grocery items
//! - `services`: Pricing, aggregation, selection, budget repair and planning
//! - `display`: Terminal formatting, including the grocery list formatter
//! - `storage`: JSON catalog files
//! - `history`: Recorded plans used to avoid repeats
//! - `export`: CSV, JSON and YAML output
//! - `cli`: Command handlers for the `mealplan` binary
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust
//! use mealplan::config::Settings;
//! use mealplan::models::{Catalog, Ingredient, Recipe, RecipeLine, StoreCategory};
//! use mealplan::services::{PlanRequest, PlanningService};
//!
//! let pasta = Ingredient::new("Pasta", StoreCategory::Pantry).with_package(3.0, 16.0, "oz");
//! let dinner = Recipe::new("Carbonara").with_line(RecipeLine::new(pasta.id, 8.0, "oz"));
//! let catalog = Catalog::new(vec![dinner], vec![pasta]);
//! let settings = Settings::default();
//!
//! let request = PlanRequest { days: 1, budget: Some(20.0), ..PlanRequest::from_settings(&settings) };
//! let outcome = PlanningService::new(&catalog, &settings).plan(&request);
//! assert!(outcome.within_budget);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PlannerError, PlannerResult};
