//! Diet entry domain model.
//!
//! # Responsibility
//! - Define one logged food portion and the meal-slot bucket map.
//! - Accept loosely typed numeric input from custom-food forms.
//!
//! # Invariants
//! - Nutrient values are per 100 units of `amount`.
//! - Non-numeric nutrient input is stored as NaN and never raises.
//! - Meal slots are an open set keyed by label.

use crate::nutrition::parse::parse_leading_number;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Meal slots every diet day starts with.
pub const DEFAULT_MEAL_SLOTS: [&str; 4] = ["breakfast", "lunch", "dinner", "snacks"];

/// Meal-slot label -> logged entries, in logging order.
pub type MealBuckets = BTreeMap<String, Vec<FoodEntry>>;

/// Returns a bucket map with every default slot present and empty.
pub fn empty_meal_buckets() -> MealBuckets {
    DEFAULT_MEAL_SLOTS
        .iter()
        .map(|slot| (slot.to_string(), Vec::new()))
        .collect()
}

/// One consumed food portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub calories: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub carbs: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub fat: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub protein: f64,
    /// Consumed amount in `unit`s; 100 means one reference portion.
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

impl FoodEntry {
    /// Multiplier applied to per-100 nutrient values.
    ///
    /// Zero when `amount` is non-positive or not a finite number.
    pub fn scale(&self) -> f64 {
        if self.amount.is_finite() && self.amount > 0.0 {
            self.amount / 100.0
        } else {
            0.0
        }
    }
}

fn missing_number() -> f64 {
    f64::NAN
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(value)) => value,
        Some(Loose::Text(text)) => parse_leading_number(&text).unwrap_or(f64::NAN),
        Some(Loose::Other(_)) | None => f64::NAN,
    })
}

#[cfg(test)]
mod tests {
    use super::{empty_meal_buckets, FoodEntry, DEFAULT_MEAL_SLOTS};

    #[test]
    fn default_buckets_have_four_empty_slots() {
        let buckets = empty_meal_buckets();
        assert_eq!(buckets.len(), DEFAULT_MEAL_SLOTS.len());
        assert!(buckets.values().all(Vec::is_empty));
    }

    #[test]
    fn scale_is_zero_for_non_positive_or_nan_amount() {
        let mut entry = FoodEntry {
            name: "rice".to_string(),
            calories: 130.0,
            carbs: 28.0,
            fat: 0.3,
            protein: 2.7,
            amount: 200.0,
            unit: None,
        };
        assert_eq!(entry.scale(), 2.0);
        entry.amount = 0.0;
        assert_eq!(entry.scale(), 0.0);
        entry.amount = -50.0;
        assert_eq!(entry.scale(), 0.0);
        entry.amount = f64::NAN;
        assert_eq!(entry.scale(), 0.0);
    }
}
