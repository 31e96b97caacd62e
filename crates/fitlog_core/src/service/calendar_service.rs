//! Calendar use-case service.
//!
//! # Responsibility
//! - Provide add/update/delete entry points for calendar events.
//! - Assemble month views and day detail lists from stored events.
//!
//! # Invariants
//! - Month loads cover the whole 42-day grid, not just the target month.
//! - Bucketing happens in the pure `calendar` module, never in SQL alone.

use crate::calendar::{events_for_date, events_for_month, MonthGrid, MonthView};
use crate::model::{CalendarEvent, EventId, EventType, ValidationError};
use crate::repo::event_repo::{EventListQuery, EventRepository};
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;

/// Request model for adding an event from the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEventRequest {
    pub title: String,
    pub description: Option<String>,
    /// Raw timestamp text (`YYYY-MM-DD` or with time of day).
    pub date: String,
    pub event_type: EventType,
}

/// Month screen payload: decorated grid plus the month's agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOverview {
    pub view: MonthView,
    /// Events inside the target month, in date order.
    pub agenda: Vec<CalendarEvent>,
}

/// Use-case service wrapper for calendar operations.
pub struct CalendarService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> CalendarService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new event.
    pub fn add_event(&self, request: &AddEventRequest) -> RepoResult<CalendarEvent> {
        let mut event = CalendarEvent::new(
            request.title.trim(),
            request.date.trim(),
            request.event_type,
        );
        event.description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        self.repo.create_event(&event)?;
        info!(
            "event=calendar_event_create module=service status=ok type={}",
            event.event_type.as_str()
        );
        Ok(event)
    }

    pub fn update_event(&self, event: &CalendarEvent) -> RepoResult<()> {
        self.repo.update_event(event)
    }

    pub fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>> {
        self.repo.get_event(id)
    }

    pub fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.repo.delete_event(id)?;
        info!("event=calendar_event_delete module=service status=ok");
        Ok(())
    }

    /// Builds the month screen for `reference`, judging cells against `today`.
    ///
    /// # Errors
    /// - `Validation(MonthOutOfRange)` for the first and last representable months.
    pub fn month_overview(&self, reference: NaiveDate, today: NaiveDate) -> RepoResult<MonthOverview> {
        let grid =
            MonthGrid::build(reference).ok_or(ValidationError::MonthOutOfRange(reference))?;
        let events = self.repo.list_events(&EventListQuery {
            from: grid.first(),
            to: grid.last(),
            ..EventListQuery::default()
        })?;
        let view = MonthView::from_grid(&grid, reference, today, &events);
        let agenda = events_for_month(&events, reference)
            .into_iter()
            .cloned()
            .collect();
        Ok(MonthOverview { view, agenda })
    }

    /// Events on a single day, for the detail sheet under the grid.
    pub fn events_on(&self, date: NaiveDate) -> RepoResult<Vec<CalendarEvent>> {
        let events = self.repo.list_events(&EventListQuery {
            from: Some(date),
            to: Some(date),
            ..EventListQuery::default()
        })?;
        Ok(events_for_date(&events, date).into_iter().cloned().collect())
    }
}
