//! Calendar event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `calendar_events`.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `CalendarEvent::validate()` before SQL mutations.
//! - `event_day` mirrors the parsed day of `event_date` for range queries.
//! - Lists are ordered by day ascending, then creation order.

use crate::model::{parse_record_date, CalendarEvent, EventId, EventType};
use crate::repo::{day_to_db, ensure_schema_ready, parse_uuid, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    event_date,
    event_type
FROM calendar_events";

/// Query options for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListQuery {
    /// Inclusive lower bound on the event day.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the event day.
    pub to: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    pub limit: Option<u32>,
}

/// Repository interface for calendar event operations.
pub trait EventRepository {
    fn create_event(&self, event: &CalendarEvent) -> RepoResult<EventId>;
    fn update_event(&self, event: &CalendarEvent) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>>;
    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<CalendarEvent>>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &CalendarEvent) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO calendar_events (
                id,
                title,
                description,
                event_date,
                event_day,
                event_type
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                event.id.to_string(),
                event.title.trim(),
                event.description.as_deref(),
                event.date.as_str(),
                parse_record_date(&event.date).map(day_to_db),
                event.event_type.as_str(),
            ],
        )?;

        Ok(event.id)
    }

    fn update_event(&self, event: &CalendarEvent) -> RepoResult<()> {
        event.validate()?;

        let changed = self.conn.execute(
            "UPDATE calendar_events
             SET
                title = ?1,
                description = ?2,
                event_date = ?3,
                event_day = ?4,
                event_type = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                event.title.trim(),
                event.description.as_deref(),
                event.date.as_str(),
                parse_record_date(&event.date).map(day_to_db),
                event.event_type.as_str(),
                event.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(event.id));
        }
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<CalendarEvent>> {
        let mut sql = format!("{EVENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(from) = query.from {
            sql.push_str(" AND event_day >= ?");
            bind_values.push(Value::Text(day_to_db(from)));
        }
        if let Some(to) = query.to {
            sql.push_str(" AND event_day <= ?");
            bind_values.push(Value::Text(day_to_db(to)));
        }
        if let Some(kind) = query.event_type {
            sql.push_str(" AND event_type = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        sql.push_str(" ORDER BY event_day ASC, event_date ASC, created_at ASC, rowid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM calendar_events WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

// Reads stay permissive about `event_date`: a row with an unparseable date is
// returned as-is and dropped later by the bucketing functions.
fn parse_event_row(row: &Row<'_>) -> RepoResult<CalendarEvent> {
    let id_text: String = row.get("id")?;
    let type_text: String = row.get("event_type")?;
    Ok(CalendarEvent {
        id: parse_uuid(&id_text, "calendar_events.id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        date: row.get("event_date")?,
        event_type: EventType::from_label(&type_text),
    })
}
