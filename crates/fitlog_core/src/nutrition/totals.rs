//! Nutrient totals across meal buckets.
//!
//! # Invariants
//! - Accumulation is unrounded; rounding happens once, on the result.
//! - Entries with non-positive amount contribute zero.
//! - Non-finite or negative nutrient values contribute zero.
//! - Result does not depend on bucket or entry order.

use crate::model::{FoodEntry, MealBuckets};
use serde::{Deserialize, Serialize};

/// Rounded calorie/macro totals for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u32,
    pub carbs: u32,
    pub fat: u32,
    pub protein: u32,
}

/// Unrounded running sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutrientSums {
    pub calories: f64,
    pub carbs: f64,
    pub fat: f64,
    pub protein: f64,
}

impl NutrientSums {
    /// Adds one entry's scaled contribution.
    pub fn add(&mut self, entry: &FoodEntry) {
        let scale = entry.scale();
        if scale == 0.0 {
            return;
        }
        self.calories += contribution(entry.calories, scale);
        self.carbs += contribution(entry.carbs, scale);
        self.fat += contribution(entry.fat, scale);
        self.protein += contribution(entry.protein, scale);
    }

    /// Rounds each sum to the nearest whole unit.
    pub fn rounded(&self) -> NutritionTotals {
        NutritionTotals {
            calories: round_unit(self.calories),
            carbs: round_unit(self.carbs),
            fat: round_unit(self.fat),
            protein: round_unit(self.protein),
        }
    }
}

/// Sums nutrients over every entry in every bucket.
pub fn sum_nutrition(buckets: &MealBuckets) -> NutritionTotals {
    sum_entries(buckets.values().flatten()).rounded()
}

/// Unrounded sums over an arbitrary entry sequence.
pub fn sum_entries<'a>(entries: impl IntoIterator<Item = &'a FoodEntry>) -> NutrientSums {
    entries
        .into_iter()
        .fold(NutrientSums::default(), |mut sums, entry| {
            sums.add(entry);
            sums
        })
}

fn contribution(value_per_100: f64, scale: f64) -> f64 {
    if value_per_100.is_finite() && value_per_100 > 0.0 {
        value_per_100 * scale
    } else {
        0.0
    }
}

fn round_unit(value: f64) -> u32 {
    // `as` saturates, so huge sums clamp instead of wrapping.
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::{sum_entries, sum_nutrition, NutritionTotals};
    use crate::model::{FoodEntry, MealBuckets};

    fn entry(name: &str, per_100: [f64; 4], amount: f64) -> FoodEntry {
        FoodEntry {
            name: name.to_string(),
            calories: per_100[0],
            carbs: per_100[1],
            fat: per_100[2],
            protein: per_100[3],
            amount,
            unit: Some("g".to_string()),
        }
    }

    fn rice_and_chicken() -> MealBuckets {
        let mut buckets = MealBuckets::new();
        buckets.insert(
            "breakfast".to_string(),
            vec![entry("white rice", [130.0, 28.0, 0.3, 2.7], 200.0)],
        );
        buckets.insert(
            "lunch".to_string(),
            vec![entry("chicken breast", [165.0, 0.0, 3.6, 31.0], 100.0)],
        );
        buckets
    }

    #[test]
    fn rice_and_chicken_round_only_at_the_end() {
        let totals = sum_nutrition(&rice_and_chicken());
        assert_eq!(
            totals,
            NutritionTotals {
                calories: 425,
                carbs: 56,
                fat: 4,
                protein: 36,
            }
        );
    }

    #[test]
    fn empty_buckets_sum_to_zero() {
        assert_eq!(sum_nutrition(&MealBuckets::new()), NutritionTotals::default());
    }

    #[test]
    fn intermediate_rounding_would_differ() {
        // Three 0.4 g fat portions: rounding each would give 0, the sum gives 1.
        let portions = vec![entry("x", [0.0, 0.0, 0.4, 0.0], 100.0); 3];
        let mut buckets = MealBuckets::new();
        buckets.insert("snacks".to_string(), portions);
        assert_eq!(sum_nutrition(&buckets).fat, 1);
    }

    #[test]
    fn malformed_entries_contribute_zero() {
        let mut buckets = MealBuckets::new();
        buckets.insert(
            "dinner".to_string(),
            vec![
                entry("zero amount", [500.0, 50.0, 20.0, 10.0], 0.0),
                entry("negative amount", [500.0, 50.0, 20.0, 10.0], -100.0),
                entry("nan fields", [f64::NAN, f64::INFINITY, -5.0, 10.0], 100.0),
            ],
        );
        let totals = sum_nutrition(&buckets);
        assert_eq!(totals.calories, 0);
        assert_eq!(totals.carbs, 0);
        assert_eq!(totals.fat, 0);
        assert_eq!(totals.protein, 10);
    }

    #[test]
    fn order_does_not_change_totals() {
        let entries = vec![
            entry("a", [52.0, 14.0, 0.2, 0.3], 150.0),
            entry("b", [89.0, 23.0, 0.3, 1.1], 120.0),
            entry("c", [155.0, 1.1, 11.0, 13.0], 60.0),
        ];
        let forward = sum_entries(&entries).rounded();
        let reversed = sum_entries(entries.iter().rev()).rounded();
        assert_eq!(forward, reversed);

        let mut one_bucket = MealBuckets::new();
        one_bucket.insert("lunch".to_string(), entries.clone());
        let mut split = MealBuckets::new();
        split.insert("zz".to_string(), vec![entries[0].clone()]);
        split.insert("aa".to_string(), vec![entries[2].clone(), entries[1].clone()]);
        assert_eq!(sum_nutrition(&one_bucket), sum_nutrition(&split));
    }
}
