//! Built-in food catalog used by the food picker.

use crate::model::FoodEntry;
use serde::{Deserialize, Serialize};

/// Catalog item with nutrients per 100 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub name: String,
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
    /// Reference portion label, for example `100g` or `100ml`.
    pub unit: String,
}

impl FoodItem {
    fn builtin(
        id: u32,
        name: &str,
        [calories, carbs, fat, protein]: [f64; 4],
        unit: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            calories,
            carbs,
            fat,
            protein,
            unit: unit.to_string(),
        }
    }

    /// Logs `amount` units of this item.
    pub fn portion(&self, amount: f64) -> FoodEntry {
        FoodEntry {
            name: self.name.clone(),
            calories: self.calories,
            carbs: self.carbs,
            fat: self.fat,
            protein: self.protein,
            amount,
            unit: Some(self.unit.clone()),
        }
    }
}

/// Searchable list of foods.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodCatalog {
    items: Vec<FoodItem>,
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FoodCatalog {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    /// Common foods shipped with the app.
    pub fn builtin() -> Self {
        Self::new(vec![
            FoodItem::builtin(1, "White rice", [130.0, 28.0, 0.3, 2.7], "100g"),
            FoodItem::builtin(2, "Chicken breast", [165.0, 0.0, 3.6, 31.0], "100g"),
            FoodItem::builtin(3, "Apple", [52.0, 14.0, 0.2, 0.3], "100g"),
            FoodItem::builtin(4, "Banana", [89.0, 23.0, 0.3, 1.1], "100g"),
            FoodItem::builtin(5, "Egg", [155.0, 1.1, 11.0, 13.0], "100g"),
            FoodItem::builtin(6, "Milk", [61.0, 4.8, 3.2, 3.2], "100ml"),
            FoodItem::builtin(7, "Bread", [265.0, 49.0, 3.2, 9.0], "100g"),
            FoodItem::builtin(8, "Salad", [20.0, 4.0, 0.2, 1.4], "100g"),
        ])
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Case-insensitive substring match on name; blank query returns all.
    pub fn search(&self, query: &str) -> Vec<&FoodItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::FoodCatalog;

    #[test]
    fn search_is_case_insensitive() {
        let catalog = FoodCatalog::builtin();
        let hits = catalog.search("CHICK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn blank_search_returns_everything() {
        let catalog = FoodCatalog::builtin();
        assert_eq!(catalog.search("  ").len(), catalog.items().len());
        assert!(catalog.search("pizza").is_empty());
    }

    #[test]
    fn portion_carries_amount_and_unit() {
        let catalog = FoodCatalog::builtin();
        let milk = catalog.get(6).expect("milk in catalog").portion(250.0);
        assert_eq!(milk.amount, 250.0);
        assert_eq!(milk.unit.as_deref(), Some("100ml"));
    }
}
