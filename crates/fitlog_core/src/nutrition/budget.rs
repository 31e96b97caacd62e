//! Daily calorie budget and macro goal progress.
//!
//! Remaining calories follow `goal - food + exercise`.

use crate::model::UserProfile;
use crate::nutrition::totals::NutritionTotals;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Progress above this ratio is flagged on the calorie ring.
pub const CALORIE_WARNING_RATIO: f64 = 0.8;

/// Daily targets used by the diet dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub calories: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub protein_g: u32,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self::from(&UserProfile::with_defaults(""))
    }
}

impl From<&UserProfile> for NutritionGoals {
    fn from(profile: &UserProfile) -> Self {
        Self {
            calories: profile.daily_calorie_goal,
            carbs_g: profile.carbs_goal_g,
            fat_g: profile.fat_goal_g,
            protein_g: profile.protein_goal_g,
        }
    }
}

/// Calorie ring state for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieBudget {
    pub goal: u32,
    pub consumed: u32,
    pub exercise: u32,
    /// May go negative once the goal is exceeded.
    pub remaining: i64,
    /// `consumed / goal`, capped at 1. Zero when the goal is zero.
    pub progress: f64,
}

impl CalorieBudget {
    pub fn compute(goal: u32, consumed: u32, exercise: u32) -> Self {
        let remaining = i64::from(goal) - i64::from(consumed) + i64::from(exercise);
        Self {
            goal,
            consumed,
            exercise,
            remaining,
            progress: capped_ratio(f64::from(consumed), f64::from(goal)),
        }
    }

    /// Whether the ring should switch to its warning color.
    pub fn is_near_limit(&self) -> bool {
        self.progress > CALORIE_WARNING_RATIO
    }
}

/// Progress of one macro nutrient against its goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub current_g: u32,
    pub goal_g: u32,
    pub ratio: f64,
}

impl MacroProgress {
    pub fn new(current_g: u32, goal_g: u32) -> Self {
        Self {
            current_g,
            goal_g,
            ratio: capped_ratio(f64::from(current_g), f64::from(goal_g)),
        }
    }
}

/// Carbs/fat/protein progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
    pub protein: MacroProgress,
}

impl MacroBreakdown {
    pub fn compute(totals: &NutritionTotals, goals: &NutritionGoals) -> Self {
        Self {
            carbs: MacroProgress::new(totals.carbs, goals.carbs_g),
            fat: MacroProgress::new(totals.fat, goals.fat_g),
            protein: MacroProgress::new(totals.protein, goals.protein_g),
        }
    }
}

/// Calories consumed on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCalories {
    pub date: NaiveDate,
    pub calories: u32,
}

/// Rounded mean of daily calories; zero for an empty slice.
pub fn weekly_average(days: &[DailyCalories]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let total: u64 = days.iter().map(|day| u64::from(day.calories)).sum();
    (total as f64 / days.len() as f64).round() as u32
}

fn capped_ratio(current: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (current / goal).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::{weekly_average, CalorieBudget, DailyCalories, MacroBreakdown, NutritionGoals};
    use crate::nutrition::NutritionTotals;
    use chrono::NaiveDate;

    #[test]
    fn remaining_adds_exercise_back() {
        let budget = CalorieBudget::compute(2600, 1800, 300);
        assert_eq!(budget.remaining, 1100);
        assert!(!budget.is_near_limit());
    }

    #[test]
    fn progress_caps_at_one_and_remaining_goes_negative() {
        let budget = CalorieBudget::compute(2000, 2500, 0);
        assert_eq!(budget.progress, 1.0);
        assert_eq!(budget.remaining, -500);
        assert!(budget.is_near_limit());
    }

    #[test]
    fn zero_goal_has_zero_progress() {
        assert_eq!(CalorieBudget::compute(0, 100, 0).progress, 0.0);
    }

    #[test]
    fn macro_breakdown_uses_default_goals() {
        let totals = NutritionTotals {
            calories: 425,
            carbs: 56,
            fat: 4,
            protein: 65,
        };
        let macros = MacroBreakdown::compute(&totals, &NutritionGoals::default());
        assert_eq!(macros.carbs.goal_g, 163);
        assert_eq!(macros.protein.ratio, 1.0);
    }

    #[test]
    fn weekly_average_rounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let days: Vec<DailyCalories> = [2400, 2200, 2300, 2500, 2100, 2600, 2350]
            .into_iter()
            .zip(start.iter_days())
            .map(|(calories, date)| DailyCalories { date, calories })
            .collect();
        assert_eq!(weekly_average(&days), 2350);
        assert_eq!(weekly_average(&[]), 0);
    }
}
