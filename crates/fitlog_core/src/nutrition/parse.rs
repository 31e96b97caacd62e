//! Lenient parsing for hand-typed food form input.
//!
//! # Responsibility
//! - Read numbers the way a permissive form does (`"150g"` -> 150).
//! - Turn a raw custom-food form into a `FoodEntry`.
//!
//! # Invariants
//! - Parsing never fails; unusable input degrades to NaN or defaults.

use crate::model::FoodEntry;
use once_cell::sync::Lazy;
use regex::Regex;

/// Amount assumed when the form leaves it empty or unusable.
pub const DEFAULT_AMOUNT: f64 = 100.0;
const CUSTOM_FOOD_UNIT: &str = "g";

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid leading number regex")
});

/// Parses the leading numeric prefix of `raw`.
///
/// Returns `None` when the text does not start with a number.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let captures = LEADING_NUMBER_RE.captures(raw)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}

/// Raw text fields of the custom food form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFoodForm {
    pub name: String,
    pub calories: String,
    pub carbs: String,
    pub fat: String,
    pub protein: String,
    pub amount: String,
}

/// Builds a food entry from raw form text.
///
/// - Nutrient fields use the leading numeric prefix; anything else is NaN
///   and later contributes zero to totals.
/// - `amount` falls back to 100 when missing, unparseable or non-positive.
pub fn parse_custom_food(form: &CustomFoodForm) -> FoodEntry {
    let amount = parse_leading_number(&form.amount)
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(DEFAULT_AMOUNT);

    FoodEntry {
        name: form.name.trim().to_string(),
        calories: parse_or_nan(&form.calories),
        carbs: parse_or_nan(&form.carbs),
        fat: parse_or_nan(&form.fat),
        protein: parse_or_nan(&form.protein),
        amount,
        unit: Some(CUSTOM_FOOD_UNIT.to_string()),
    }
}

fn parse_or_nan(raw: &str) -> f64 {
    parse_leading_number(raw).unwrap_or(f64::NAN)
}
