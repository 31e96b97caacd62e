//! Diet entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist logged food portions per day and meal slot.
//! - Rebuild a day's `MealBuckets` in logging order.
//!
//! # Invariants
//! - Meal slot labels are trimmed and lowercased before persistence.
//! - NaN nutrient values are stored as NULL and read back as NaN.
//! - Loaded buckets always include the default meal slots.

use crate::model::{empty_meal_buckets, FoodEntry, MealBuckets, ValidationError};
use crate::repo::{day_to_db, ensure_schema_ready, parse_day, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const DIET_SELECT_SQL: &str = "SELECT
    id,
    entry_day,
    meal_slot,
    name,
    calories,
    carbs,
    fat,
    protein,
    amount,
    unit
FROM diet_entries";

/// One persisted food portion with its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct DietEntryRecord {
    pub id: Uuid,
    pub day: NaiveDate,
    pub meal_slot: String,
    pub entry: FoodEntry,
}

/// Repository interface for diet log operations.
pub trait DietRepository {
    /// Appends `entry` to the `meal_slot` bucket of `day`.
    fn add_entry(&self, day: NaiveDate, meal_slot: &str, entry: &FoodEntry) -> RepoResult<Uuid>;
    /// Lists entries logged on `day` in logging order.
    fn list_day_entries(&self, day: NaiveDate) -> RepoResult<Vec<DietEntryRecord>>;
    /// Lists entries logged within `[from, to]`.
    fn list_range_entries(&self, from: NaiveDate, to: NaiveDate)
        -> RepoResult<Vec<DietEntryRecord>>;
    fn remove_entry(&self, id: Uuid) -> RepoResult<()>;

    /// Loads `day` as meal buckets.
    fn load_day(&self, day: NaiveDate) -> RepoResult<MealBuckets> {
        let mut buckets = empty_meal_buckets();
        for record in self.list_day_entries(day)? {
            buckets
                .entry(record.meal_slot)
                .or_default()
                .push(record.entry);
        }
        Ok(buckets)
    }
}

/// Normalizes a meal slot label for storage and lookup.
pub fn normalize_meal_slot(value: &str) -> Result<String, ValidationError> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ValidationError::EmptyField("meal_slot"));
    }
    Ok(normalized)
}

/// SQLite-backed diet repository.
pub struct SqliteDietRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDietRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_entries(
        &self,
        sql_suffix: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<DietEntryRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DIET_SELECT_SQL} {sql_suffix}"))?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_diet_row(row)?);
        }
        Ok(records)
    }
}

impl DietRepository for SqliteDietRepository<'_> {
    fn add_entry(&self, day: NaiveDate, meal_slot: &str, entry: &FoodEntry) -> RepoResult<Uuid> {
        let meal_slot = normalize_meal_slot(meal_slot)?;
        if entry.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO diet_entries (
                id,
                entry_day,
                meal_slot,
                name,
                calories,
                carbs,
                fat,
                protein,
                amount,
                unit
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                id.to_string(),
                day_to_db(day),
                meal_slot,
                entry.name.trim(),
                finite_or_null(entry.calories),
                finite_or_null(entry.carbs),
                finite_or_null(entry.fat),
                finite_or_null(entry.protein),
                finite_or_null(entry.amount),
                entry.unit.as_deref(),
            ],
        )?;
        Ok(id)
    }

    fn list_day_entries(&self, day: NaiveDate) -> RepoResult<Vec<DietEntryRecord>> {
        self.query_entries(
            "WHERE entry_day = ?1 ORDER BY created_at ASC, rowid ASC;",
            [day_to_db(day)],
        )
    }

    fn list_range_entries(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepoResult<Vec<DietEntryRecord>> {
        self.query_entries(
            "WHERE entry_day >= ?1 AND entry_day <= ?2
             ORDER BY entry_day ASC, created_at ASC, rowid ASC;",
            [day_to_db(from), day_to_db(to)],
        )
    }

    fn remove_entry(&self, id: Uuid) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM diet_entries WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_diet_row(row: &Row<'_>) -> RepoResult<DietEntryRecord> {
    let id_text: String = row.get("id")?;
    let day_text: String = row.get("entry_day")?;
    Ok(DietEntryRecord {
        id: parse_uuid(&id_text, "diet_entries.id")?,
        day: parse_day(&day_text, "diet_entries.entry_day")?,
        meal_slot: row.get("meal_slot")?,
        entry: FoodEntry {
            name: row.get("name")?,
            calories: null_as_nan(row.get("calories")?),
            carbs: null_as_nan(row.get("carbs")?),
            fat: null_as_nan(row.get("fat")?),
            protein: null_as_nan(row.get("protein")?),
            amount: null_as_nan(row.get("amount")?),
            unit: row.get("unit")?,
        },
    })
}

fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn null_as_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::normalize_meal_slot;
    use crate::model::ValidationError;

    #[test]
    fn meal_slot_is_trimmed_and_lowercased() {
        assert_eq!(normalize_meal_slot(" Brunch ").as_deref(), Ok("brunch"));
        assert_eq!(
            normalize_meal_slot("  "),
            Err(ValidationError::EmptyField("meal_slot"))
        );
    }
}
