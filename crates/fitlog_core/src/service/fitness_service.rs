//! Dashboard, profile and community use-case service.
//!
//! # Responsibility
//! - Resolve user profiles, falling back to default goals.
//! - Log workouts and weight entries.
//! - Summarize the current week for the dashboard.
//! - Publish and list community posts.

use crate::calendar::events_in_range;
use crate::model::{CommunityPost, UserProfile, WeightEntry, WorkoutRecord};
use crate::repo::fitness_repo::FitnessRepository;
use crate::repo::RepoResult;
use chrono::{Datelike, Days, NaiveDate};
use log::info;
use uuid::Uuid;

/// Weight change between the first and latest measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTrend {
    pub latest_kg: f64,
    pub latest_date: NaiveDate,
    /// Latest minus first measurement; zero with a single entry.
    pub change_kg: f64,
}

/// Current-week numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Sunday that starts the summarized week.
    pub week_start: NaiveDate,
    pub workouts_this_week: usize,
    pub active_minutes: u32,
    pub calories_burned: u32,
    pub weight: Option<WeightTrend>,
}

/// Fitness service facade over repository implementations.
pub struct FitnessService<R: FitnessRepository> {
    repo: R,
}

impl<R: FitnessRepository> FitnessService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stored profile, or one carrying default goals when none was saved.
    pub fn profile(&self, user_id: &str) -> RepoResult<UserProfile> {
        Ok(self
            .repo
            .get_profile(user_id)?
            .unwrap_or_else(|| UserProfile::with_defaults(user_id)))
    }

    pub fn save_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        self.repo.save_profile(profile)
    }

    pub fn log_workout(&self, workout: &WorkoutRecord) -> RepoResult<Uuid> {
        let id = self.repo.add_workout(workout)?;
        info!(
            "event=workout_log module=service status=ok type={}",
            workout.workout_type.as_str()
        );
        Ok(id)
    }

    /// Workouts for `user_id`, newest first.
    pub fn workouts(&self, user_id: &str) -> RepoResult<Vec<WorkoutRecord>> {
        self.repo.list_workouts(user_id)
    }

    pub fn log_weight(&self, entry: &WeightEntry) -> RepoResult<Uuid> {
        self.repo.add_weight(entry)
    }

    /// `None` until at least one weight has been logged.
    pub fn weight_trend(&self, user_id: &str) -> RepoResult<Option<WeightTrend>> {
        let weights = self.repo.list_weights(user_id)?;
        let (Some(first), Some(latest)) = (weights.first(), weights.last()) else {
            return Ok(None);
        };
        Ok(Some(WeightTrend {
            latest_kg: latest.weight_kg,
            latest_date: latest.date,
            change_kg: latest.weight_kg - first.weight_kg,
        }))
    }

    /// Summarizes the Sunday-first week containing `today`.
    pub fn dashboard(&self, user_id: &str, today: NaiveDate) -> RepoResult<DashboardSummary> {
        let week_start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
        let week_end = week_start + Days::new(6);

        let workouts = self.repo.list_workouts(user_id)?;
        let this_week = events_in_range(&workouts, week_start, week_end);
        let calories_burned: f64 = this_week
            .iter()
            .map(|workout| workout.calories_burned)
            .sum();

        Ok(DashboardSummary {
            week_start,
            workouts_this_week: this_week.len(),
            active_minutes: this_week
                .iter()
                .map(|workout| workout.duration_minutes)
                .sum(),
            calories_burned: calories_burned.round().max(0.0) as u32,
            weight: self.weight_trend(user_id)?,
        })
    }

    pub fn publish_post(&self, user_id: &str, content: &str) -> RepoResult<CommunityPost> {
        let post = self.repo.add_post(&CommunityPost::new(user_id, content))?;
        info!("event=community_post module=service status=ok");
        Ok(post)
    }

    /// Newest posts first; `limit` defaults to 20.
    pub fn feed(&self, limit: Option<u32>) -> RepoResult<Vec<CommunityPost>> {
        self.repo.list_posts(limit)
    }
}
