//! Workout, weight, profile and community-post records.
//!
//! # Responsibility
//! - Define the per-user documents behind the dashboard and community feed.
//!
//! # Invariants
//! - Every record is owned by a non-empty `user_id`.
//! - Dates are plain local calendar days.

use crate::model::event::EventType;
use crate::model::{DatedRecord, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_DAILY_CALORIE_GOAL: u32 = 2600;
pub const DEFAULT_CARBS_GOAL_G: u32 = 163;
pub const DEFAULT_FAT_GOAL_G: u32 = 43;
pub const DEFAULT_PROTEIN_GOAL_G: u32 = 65;

/// Logged training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub workout_type: EventType,
    pub duration_minutes: u32,
    pub calories_burned: f64,
    pub date: NaiveDate,
}

impl WorkoutRecord {
    pub fn new(
        user_id: impl Into<String>,
        title: impl Into<String>,
        workout_type: EventType,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            workout_type,
            duration_minutes: 0,
            calories_burned: 0.0,
            date,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_id(&self.user_id)?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if !self.calories_burned.is_finite() || self.calories_burned < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "calories_burned",
                value: self.calories_burned,
            });
        }
        Ok(())
    }
}

impl DatedRecord for WorkoutRecord {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn record_type(&self) -> &str {
        self.workout_type.as_str()
    }
}

/// Body-weight measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub weight_kg: f64,
}

impl WeightEntry {
    pub fn new(user_id: impl Into<String>, date: NaiveDate, weight_kg: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            date,
            weight_kg,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_id(&self.user_id)?;
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(ValidationError::NonPositiveWeight(self.weight_kg));
        }
        Ok(())
    }
}

impl DatedRecord for WeightEntry {
    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn record_type(&self) -> &str {
        "weight"
    }
}

/// Per-user settings and nutrition goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: String,
    pub display_name: String,
    pub daily_calorie_goal: u32,
    pub carbs_goal_g: u32,
    pub fat_goal_g: u32,
    pub protein_goal_g: u32,
}

impl UserProfile {
    /// Profile with default goals for a user who has not saved settings yet.
    pub fn with_defaults(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            display_name: String::new(),
            daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
            carbs_goal_g: DEFAULT_CARBS_GOAL_G,
            fat_goal_g: DEFAULT_FAT_GOAL_G,
            protein_goal_g: DEFAULT_PROTEIN_GOAL_G,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_id(&self.user_id)
    }
}

/// Community feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: String,
    pub content: String,
    /// Unix epoch milliseconds, assigned by the store on insert.
    pub created_at_ms: i64,
}

impl CommunityPost {
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            content: content.into(),
            created_at_ms: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_id(&self.user_id)?;
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyField("content"));
        }
        Ok(())
    }
}

fn validate_user_id(user_id: &str) -> Result<(), ValidationError> {
    if user_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("user_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CommunityPost, UserProfile, WeightEntry, WorkoutRecord};
    use crate::model::{EventType, ValidationError};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }

    #[test]
    fn profile_defaults_match_diet_goals() {
        let profile = UserProfile::with_defaults("u1");
        assert_eq!(profile.daily_calorie_goal, 2600);
        assert_eq!(
            (profile.carbs_goal_g, profile.fat_goal_g, profile.protein_goal_g),
            (163, 43, 65)
        );
    }

    #[test]
    fn weight_must_be_positive() {
        let entry = WeightEntry::new("u1", day(), 0.0);
        assert_eq!(entry.validate(), Err(ValidationError::NonPositiveWeight(0.0)));
    }

    #[test]
    fn records_require_owner() {
        let workout = WorkoutRecord::new("", "Legs", EventType::Workout, day());
        assert_eq!(workout.validate(), Err(ValidationError::EmptyField("user_id")));

        let post = CommunityPost::new("u1", "   ");
        assert_eq!(post.validate(), Err(ValidationError::EmptyField("content")));
    }
}
