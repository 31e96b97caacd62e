//! Nutrition arithmetic for the diet tracker.
//!
//! # Responsibility
//! - Sum calorie/macro totals over meal buckets.
//! - Derive calorie budget and macro progress from totals and goals.
//! - Provide the food catalog and lenient form parsing.
//!
//! # Invariants
//! - Everything here is pure; no storage or clock access.

pub mod budget;
pub mod catalog;
pub mod parse;
pub mod totals;

pub use budget::{
    weekly_average, CalorieBudget, DailyCalories, MacroBreakdown, MacroProgress, NutritionGoals,
};
pub use catalog::{FoodCatalog, FoodItem};
pub use parse::{parse_custom_food, parse_leading_number, CustomFoodForm};
pub use totals::{sum_entries, sum_nutrition, NutrientSums, NutritionTotals};
