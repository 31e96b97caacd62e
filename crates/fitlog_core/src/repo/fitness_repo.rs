//! Workout, weight, profile and community-post persistence.
//!
//! # Responsibility
//! - Store per-user dashboard documents and the shared community feed.
//!
//! # Invariants
//! - Workouts list newest day first; weights list oldest day first.
//! - At most one profile exists per `user_id`; saving upserts.
//! - Feed limit defaults to 20 and clamps to 100.

use crate::model::{CommunityPost, EventType, UserProfile, WeightEntry, WorkoutRecord};
use crate::repo::{day_to_db, ensure_schema_ready, parse_day, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

pub const FEED_DEFAULT_LIMIT: u32 = 20;
pub const FEED_LIMIT_MAX: u32 = 100;

/// Repository interface for fitness documents.
pub trait FitnessRepository {
    fn add_workout(&self, workout: &WorkoutRecord) -> RepoResult<Uuid>;
    fn list_workouts(&self, user_id: &str) -> RepoResult<Vec<WorkoutRecord>>;
    fn add_weight(&self, entry: &WeightEntry) -> RepoResult<Uuid>;
    fn list_weights(&self, user_id: &str) -> RepoResult<Vec<WeightEntry>>;
    /// Inserts or replaces the profile for `profile.user_id`.
    fn save_profile(&self, profile: &UserProfile) -> RepoResult<()>;
    fn get_profile(&self, user_id: &str) -> RepoResult<Option<UserProfile>>;
    /// Stores a post and returns it with the store-assigned timestamp.
    fn add_post(&self, post: &CommunityPost) -> RepoResult<CommunityPost>;
    /// Newest posts first.
    fn list_posts(&self, limit: Option<u32>) -> RepoResult<Vec<CommunityPost>>;
}

/// Clamps a requested feed size into `1..=FEED_LIMIT_MAX`.
pub fn normalize_feed_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => FEED_DEFAULT_LIMIT,
        Some(value) => value.min(FEED_LIMIT_MAX),
    }
}

/// SQLite-backed fitness repository.
pub struct SqliteFitnessRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFitnessRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl FitnessRepository for SqliteFitnessRepository<'_> {
    fn add_workout(&self, workout: &WorkoutRecord) -> RepoResult<Uuid> {
        workout.validate()?;
        self.conn.execute(
            "INSERT INTO workouts (
                id,
                user_id,
                title,
                workout_type,
                duration_minutes,
                calories_burned,
                workout_day
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                workout.id.to_string(),
                workout.user_id.as_str(),
                workout.title.trim(),
                workout.workout_type.as_str(),
                workout.duration_minutes,
                workout.calories_burned,
                day_to_db(workout.date),
            ],
        )?;
        Ok(workout.id)
    }

    fn list_workouts(&self, user_id: &str) -> RepoResult<Vec<WorkoutRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, workout_type, duration_minutes, calories_burned, workout_day
             FROM workouts
             WHERE user_id = ?1
             ORDER BY workout_day DESC, created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut workouts = Vec::new();
        while let Some(row) = rows.next()? {
            workouts.push(parse_workout_row(row)?);
        }
        Ok(workouts)
    }

    fn add_weight(&self, entry: &WeightEntry) -> RepoResult<Uuid> {
        entry.validate()?;
        self.conn.execute(
            "INSERT INTO weight_entries (id, user_id, entry_day, weight_kg)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.id.to_string(),
                entry.user_id.as_str(),
                day_to_db(entry.date),
                entry.weight_kg,
            ],
        )?;
        Ok(entry.id)
    }

    fn list_weights(&self, user_id: &str) -> RepoResult<Vec<WeightEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, entry_day, weight_kg
             FROM weight_entries
             WHERE user_id = ?1
             ORDER BY entry_day ASC, created_at ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let day_text: String = row.get("entry_day")?;
            entries.push(WeightEntry {
                id: parse_uuid(&id_text, "weight_entries.id")?,
                user_id: row.get("user_id")?,
                date: parse_day(&day_text, "weight_entries.entry_day")?,
                weight_kg: row.get("weight_kg")?,
            });
        }
        Ok(entries)
    }

    fn save_profile(&self, profile: &UserProfile) -> RepoResult<()> {
        profile.validate()?;
        self.conn.execute(
            "INSERT INTO user_profiles (
                id,
                user_id,
                display_name,
                daily_calorie_goal,
                carbs_goal_g,
                fat_goal_g,
                protein_goal_g
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(user_id) DO UPDATE SET
                display_name = excluded.display_name,
                daily_calorie_goal = excluded.daily_calorie_goal,
                carbs_goal_g = excluded.carbs_goal_g,
                fat_goal_g = excluded.fat_goal_g,
                protein_goal_g = excluded.protein_goal_g,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                profile.id.to_string(),
                profile.user_id.as_str(),
                profile.display_name.trim(),
                profile.daily_calorie_goal,
                profile.carbs_goal_g,
                profile.fat_goal_g,
                profile.protein_goal_g,
            ],
        )?;
        Ok(())
    }

    fn get_profile(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, display_name, daily_calorie_goal, carbs_goal_g, fat_goal_g, protein_goal_g
                 FROM user_profiles
                 WHERE user_id = ?1;",
                [user_id],
                |row| {
                    Ok((
                        row.get::<_, String>("id")?,
                        UserProfile {
                            id: Uuid::nil(),
                            user_id: row.get("user_id")?,
                            display_name: row.get("display_name")?,
                            daily_calorie_goal: row.get("daily_calorie_goal")?,
                            carbs_goal_g: row.get("carbs_goal_g")?,
                            fat_goal_g: row.get("fat_goal_g")?,
                            protein_goal_g: row.get("protein_goal_g")?,
                        },
                    ))
                },
            )
            .optional()?;

        match row {
            Some((id_text, mut profile)) => {
                profile.id = parse_uuid(&id_text, "user_profiles.id")?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }

    fn add_post(&self, post: &CommunityPost) -> RepoResult<CommunityPost> {
        post.validate()?;
        let created_at_ms: i64 = self.conn.query_row(
            "INSERT INTO community_posts (id, user_id, content)
             VALUES (?1, ?2, ?3)
             RETURNING created_at;",
            params![post.id.to_string(), post.user_id.as_str(), post.content.trim()],
            |row| row.get(0),
        )?;
        Ok(CommunityPost {
            content: post.content.trim().to_string(),
            created_at_ms,
            ..post.clone()
        })
    }

    fn list_posts(&self, limit: Option<u32>) -> RepoResult<Vec<CommunityPost>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, content, created_at
             FROM community_posts
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([normalize_feed_limit(limit)])?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            posts.push(CommunityPost {
                id: parse_uuid(&id_text, "community_posts.id")?,
                user_id: row.get("user_id")?,
                content: row.get("content")?,
                created_at_ms: row.get("created_at")?,
            });
        }
        Ok(posts)
    }
}

fn parse_workout_row(row: &Row<'_>) -> RepoResult<WorkoutRecord> {
    let id_text: String = row.get("id")?;
    let type_text: String = row.get("workout_type")?;
    let day_text: String = row.get("workout_day")?;
    Ok(WorkoutRecord {
        id: parse_uuid(&id_text, "workouts.id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        workout_type: EventType::from_label(&type_text),
        duration_minutes: row.get("duration_minutes")?,
        calories_burned: row.get("calories_burned")?,
        date: parse_day(&day_text, "workouts.workout_day")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{normalize_feed_limit, FEED_DEFAULT_LIMIT, FEED_LIMIT_MAX};

    #[test]
    fn feed_limit_defaults_and_clamps() {
        assert_eq!(normalize_feed_limit(None), FEED_DEFAULT_LIMIT);
        assert_eq!(normalize_feed_limit(Some(0)), FEED_DEFAULT_LIMIT);
        assert_eq!(normalize_feed_limit(Some(5)), 5);
        assert_eq!(normalize_feed_limit(Some(1_000)), FEED_LIMIT_MAX);
    }
}
