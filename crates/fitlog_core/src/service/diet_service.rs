//! Diet tracking use-case service.
//!
//! # Responsibility
//! - Log catalog or custom foods into a day's meal slot.
//! - Produce the day summary (totals, calorie ring, macro bars).
//! - Produce the seven-day calorie series for the weekly chart.
//!
//! # Invariants
//! - Totals are always recomputed from stored entries; nothing is cached.

use crate::model::{FoodEntry, MealBuckets};
use crate::nutrition::{
    parse_custom_food, sum_entries, sum_nutrition, weekly_average, CalorieBudget, CustomFoodForm,
    DailyCalories, FoodCatalog, MacroBreakdown, NutritionGoals, NutritionTotals,
};
use crate::repo::diet_repo::DietRepository;
use crate::repo::RepoResult;
use chrono::{Days, NaiveDate};
use log::{info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const WEEK_DAYS: u64 = 7;

/// Service error for diet use-cases.
#[derive(Debug)]
pub enum DietServiceError {
    /// Catalog has no item with this id.
    UnknownFood(u32),
    /// Persistence-layer failure.
    Repo(crate::repo::RepoError),
}

impl Display for DietServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFood(id) => write!(f, "unknown catalog food: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DietServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::UnknownFood(_) => None,
        }
    }
}

impl From<crate::repo::RepoError> for DietServiceError {
    fn from(value: crate::repo::RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Everything the diet screen shows for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub buckets: MealBuckets,
    pub totals: NutritionTotals,
    pub budget: CalorieBudget,
    pub macros: MacroBreakdown,
}

/// Seven-day calorie series ending on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyCalories {
    pub days: Vec<DailyCalories>,
    pub average: u32,
}

/// Diet service facade over repository implementations.
pub struct DietService<R: DietRepository> {
    repo: R,
    catalog: FoodCatalog,
}

impl<R: DietRepository> DietService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_catalog(repo, FoodCatalog::builtin())
    }

    pub fn with_catalog(repo: R, catalog: FoodCatalog) -> Self {
        Self { repo, catalog }
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Logs `amount` units of catalog food `food_id`.
    pub fn log_catalog_food(
        &self,
        day: NaiveDate,
        meal_slot: &str,
        food_id: u32,
        amount: f64,
    ) -> Result<Uuid, DietServiceError> {
        let item = self
            .catalog
            .get(food_id)
            .ok_or(DietServiceError::UnknownFood(food_id))?;
        Ok(self.log_entry(day, meal_slot, &item.portion(amount))?)
    }

    /// Logs a hand-entered food; bad numeric fields are kept and count as zero.
    pub fn log_custom_food(
        &self,
        day: NaiveDate,
        meal_slot: &str,
        form: &CustomFoodForm,
    ) -> Result<Uuid, DietServiceError> {
        let entry = parse_custom_food(form);
        Ok(self.log_entry(day, meal_slot, &entry)?)
    }

    pub fn remove_entry(&self, id: Uuid) -> RepoResult<()> {
        self.repo.remove_entry(id)
    }

    /// Builds the day summary against `goals`.
    pub fn day_summary(
        &self,
        day: NaiveDate,
        goals: &NutritionGoals,
        exercise_calories: u32,
    ) -> RepoResult<DaySummary> {
        let buckets = self.repo.load_day(day)?;
        let totals = sum_nutrition(&buckets);
        Ok(DaySummary {
            date: day,
            budget: CalorieBudget::compute(goals.calories, totals.calories, exercise_calories),
            macros: MacroBreakdown::compute(&totals, goals),
            totals,
            buckets,
        })
    }

    /// Calories for the seven days ending on `last_day`, zero-filled.
    pub fn weekly_calories(&self, last_day: NaiveDate) -> RepoResult<WeeklyCalories> {
        let first_day = last_day - Days::new(WEEK_DAYS - 1);
        let records = self.repo.list_range_entries(first_day, last_day)?;

        let mut per_day: BTreeMap<NaiveDate, Vec<FoodEntry>> = BTreeMap::new();
        for record in records {
            per_day.entry(record.day).or_default().push(record.entry);
        }

        let days: Vec<DailyCalories> = first_day
            .iter_days()
            .take(WEEK_DAYS as usize)
            .map(|date| DailyCalories {
                date,
                calories: per_day
                    .get(&date)
                    .map_or(0, |entries| sum_entries(entries).rounded().calories),
            })
            .collect();
        let average = weekly_average(&days);
        Ok(WeeklyCalories { days, average })
    }

    fn log_entry(&self, day: NaiveDate, meal_slot: &str, entry: &FoodEntry) -> RepoResult<Uuid> {
        if entry.scale() == 0.0 {
            warn!("event=diet_log module=service status=degraded reason=non_positive_amount");
        }
        let id = self.repo.add_entry(day, meal_slot, entry)?;
        info!("event=diet_log module=service status=ok day={day}");
        Ok(id)
    }
}
