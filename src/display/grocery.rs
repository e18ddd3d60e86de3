//! Grocery list formatting
//!
//! Turns priced, consolidated grocery items into a display-ready list grouped
//! by store category. Costs are rounded to cents here and nowhere earlier.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{format_quantity, ConsolidatedGroceryItem, Money, StoreCategory};

/// Default aisle order for the list
pub const DEFAULT_CATEGORY_ORDER: [&str; 5] = ["Produce", "Meat", "Dairy", "Pantry", "Frozen"];

/// Marker shown instead of a price when none is known
pub const PRICE_UNKNOWN: &str = "[Price Unknown]";

/// One printable grocery line
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryLine {
    pub name: String,
    pub quantity: f64,
    pub unit: Option<String>,
    pub packages: Option<u32>,
    /// Full display string
    pub text: String,
    /// Rounded cost; `None` when the price is unknown
    pub cost: Option<Money>,
    pub flagged: bool,
}

/// Lines for one store category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrocerySection {
    pub category: StoreCategory,
    pub lines: Vec<GroceryLine>,
}

/// A complete grocery list ready for display or export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    pub sections: Vec<GrocerySection>,
    pub total: Money,
    pub flagged_count: usize,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.lines.is_empty())
    }

    /// Iterate lines with their category, in display order
    pub fn lines(&self) -> impl Iterator<Item = (&StoreCategory, &GroceryLine)> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(move |l| (&s.category, l)))
    }
}

/// Groups and renders grocery items
pub struct GroceryListFormatter<'a> {
    category_order: &'a [String],
    currency_symbol: &'a str,
}

impl<'a> GroceryListFormatter<'a> {
    pub fn new(category_order: &'a [String], currency_symbol: &'a str) -> Self {
        Self {
            category_order,
            currency_symbol,
        }
    }

    /// Build the grouped list
    pub fn format(&self, items: &[ConsolidatedGroceryItem]) -> GroceryList {
        let mut sorted: Vec<&ConsolidatedGroceryItem> = items.iter().collect();
        sorted.sort_by(|a, b| {
            a.category
                .display_cmp(&b.category, self.category_order)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        // Categories differing only by case share a section
        let mut sections: Vec<GrocerySection> = Vec::new();
        for item in sorted {
            let line = self.line(item);
            match sections.last_mut() {
                Some(section)
                    if section.category.display_cmp(&item.category, self.category_order)
                        == Ordering::Equal =>
                {
                    section.lines.push(line)
                }
                _ => sections.push(GrocerySection {
                    category: item.category.clone(),
                    lines: vec![line],
                }),
            }
        }

        let total: f64 = items.iter().filter(|i| !i.flagged).map(|i| i.cost).sum();

        GroceryList {
            sections,
            total: Money::from_dollars_rounded(total),
            flagged_count: items.iter().filter(|i| i.flagged).count(),
        }
    }

    /// Render one item as a display string
    pub fn line(&self, item: &ConsolidatedGroceryItem) -> GroceryLine {
        let amount = quantity_with_unit(item.quantity, item.unit.as_deref());

        if item.flagged {
            return GroceryLine {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                packages: None,
                text: format!("{} {} {}", amount, item.name, PRICE_UNKNOWN),
                cost: None,
                flagged: true,
            };
        }

        let cost = Money::from_dollars_rounded(item.cost);
        let price = cost.format_with_symbol(self.currency_symbol);
        let text = match (item.packages, item.package_label.as_deref()) {
            (Some(count), Some(label)) => format!("{}x {} {} ({})", count, label, item.name, price),
            _ => format!("{} {} ({})", amount, item.name, price),
        };

        GroceryLine {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            packages: item.packages,
            text,
            cost: Some(cost),
            flagged: false,
        }
    }
}

fn quantity_with_unit(quantity: f64, unit: Option<&str>) -> String {
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(unit) => format!("{} {}", format_quantity(quantity), unit),
        None => format_quantity(quantity),
    }
}

/// Render a grocery list for the terminal
pub fn format_grocery_list(list: &GroceryList, currency_symbol: &str) -> String {
    if list.is_empty() {
        return "Nothing to buy.\n".to_string();
    }

    let mut output = String::new();
    for section in &list.sections {
        output.push_str(&format!("{}\n", section.category));
        for line in &section.lines {
            output.push_str(&format!("  {}\n", line.text));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Total: {}\n",
        list.total.format_with_symbol(currency_symbol)
    ));
    if list.flagged_count > 0 {
        output.push_str(&format!(
            "{} item(s) have no known price and are not included in the total\n",
            list.flagged_count
        ));
    }
    output
}

/// Default category order as owned strings
pub fn default_category_order() -> Vec<String> {
    DEFAULT_CATEGORY_ORDER.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Ingredient, Recipe, RecipeLine};
    use crate::services::CostAggregator;

    fn item(name: &str, category: StoreCategory) -> ConsolidatedGroceryItem {
        ConsolidatedGroceryItem {
            ingredient_id: crate::models::IngredientId::new(),
            name: name.to_string(),
            category,
            quantity: 1.0,
            unit: Some("lb".to_string()),
            packages: Some(1),
            package_label: Some("1 lb".to_string()),
            cost: 1.0,
            method: crate::models::PricingMethod::Package,
            flagged: false,
            sources: Vec::new(),
            pantry_quantity: 0.0,
        }
    }

    #[test]
    fn test_unknown_unit_marked_price_unknown() {
        let oil = Ingredient::new("Olive Oil", StoreCategory::Pantry).with_package(6.0, 16.0, "fl oz");
        let recipe = Recipe::new("Salad").with_line(RecipeLine::new(oil.id, 2.0, "glug"));
        let catalog = Catalog::new(vec![recipe.clone()], vec![oil]);

        let items = CostAggregator::new(&catalog).consolidate(&[&recipe]);
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "$").format(&items);

        assert_eq!(list.flagged_count, 1);
        let (_, line) = list.lines().next().unwrap();
        assert_eq!(line.text, "2 glug Olive Oil [Price Unknown]");
        assert!(!line.text.contains("$0.00"));
        assert!(line.cost.is_none());
        assert_eq!(list.total, Money::zero());
    }

    #[test]
    fn test_package_line_text() {
        let pasta = Ingredient::new("Pasta", StoreCategory::Pantry).with_package(3.0, 16.0, "oz");
        let a = Recipe::new("A").with_line(RecipeLine::new(pasta.id, 8.0, "oz"));
        let b = Recipe::new("B").with_line(RecipeLine::new(pasta.id, 8.0, "oz"));
        let catalog = Catalog::new(vec![a.clone(), b.clone()], vec![pasta]);

        let items = CostAggregator::new(&catalog).consolidate(&[&a, &b]);
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "$").format(&items);

        let texts: Vec<&str> = list.lines().map(|(_, l)| l.text.as_str()).collect();
        assert_eq!(texts, vec!["1x 16 oz Pasta ($3.00)"]);
        assert_eq!(list.total, Money::from_cents(300));
    }

    #[test]
    fn test_base_unit_line_text() {
        let saffron = Ingredient::new("Saffron", StoreCategory::Pantry).with_base_price(8.0, "g");
        let recipe = Recipe::new("Paella").with_line(RecipeLine::new(saffron.id, 0.5, "g"));
        let catalog = Catalog::new(vec![recipe.clone()], vec![saffron]);

        let items = CostAggregator::new(&catalog).consolidate(&[&recipe]);
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "$").format(&items);

        let (_, line) = list.lines().next().unwrap();
        assert_eq!(line.text, "0.5 g Saffron ($4.00)");
    }

    #[test]
    fn test_category_and_name_order() {
        let items = vec![
            item("zucchini", StoreCategory::Produce),
            item("Peas", StoreCategory::Frozen),
            item("Spices", StoreCategory::Other("Bulk".into())),
            item("Apples", StoreCategory::Produce),
            item("Milk", StoreCategory::Dairy),
            item("Chicken", StoreCategory::Meat),
            item("Napkins", StoreCategory::Other("Aisle 9".into())),
        ];
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "$").format(&items);

        let categories: Vec<&str> = list.sections.iter().map(|s| s.category.name()).collect();
        assert_eq!(
            categories,
            vec!["Produce", "Meat", "Dairy", "Frozen", "Aisle 9", "Bulk"]
        );
        let produce: Vec<&str> = list.sections[0].lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(produce, vec!["Apples", "zucchini"]);
        assert_eq!(list.total, Money::from_cents(700));
    }

    #[test]
    fn test_category_case_variants_share_section() {
        let items = vec![
            item("Lentils", StoreCategory::Other("Bulk".into())),
            item("Oats", StoreCategory::Other("bulk".into())),
            item("Rice", StoreCategory::Other("BULK".into())),
            item("Apples", StoreCategory::Produce),
        ];
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "$").format(&items);

        assert_eq!(list.sections.len(), 2);
        let bulk: Vec<&str> = list.sections[1].lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(bulk, vec!["Lentils", "Oats", "Rice"]);
    }

    #[test]
    fn test_terminal_rendering() {
        let items = vec![item("Apples", StoreCategory::Produce)];
        let order = default_category_order();
        let list = GroceryListFormatter::new(&order, "€").format(&items);
        let text = format_grocery_list(&list, "€");
        assert!(text.contains("Produce\n  1x 1 lb Apples (€1.00)\n"));
        assert!(text.contains("Total: €1.00"));
    }
}
