//! Display formatting for terminal output
//!
//! Provides utilities for formatting recipes, plans and grocery lists for
//! terminal display. Every function returns a `String`; printing is left to
//! the CLI.

pub mod grocery;
pub mod plan;
pub mod recipe;

pub use grocery::{format_grocery_list, GroceryLine, GroceryList, GroceryListFormatter, GrocerySection};
pub use plan::format_plan;
pub use recipe::{format_recipe_details, format_recipe_list};

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
