//! Calendar event domain model.
//!
//! # Responsibility
//! - Define the event record shown in the calendar month view.
//! - Map event type tags to display icon/color metadata.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `title` is non-empty after trimming.
//! - `date` is kept as the raw stored timestamp; day identity is derived.

use crate::model::record::{has_time_component, parse_record_date, parse_record_datetime};
use crate::model::{DatedRecord, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for calendar events.
pub type EventId = Uuid;

/// Activity category of a calendar event.
///
/// Unknown tags coming from the store collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Workout,
    Running,
    Yoga,
    Swimming,
    Cycling,
    Nutrition,
    #[serde(other)]
    Other,
}

impl EventType {
    /// All known event types, in picker order.
    pub const ALL: [EventType; 7] = [
        EventType::Workout,
        EventType::Running,
        EventType::Yoga,
        EventType::Swimming,
        EventType::Cycling,
        EventType::Nutrition,
        EventType::Other,
    ];

    /// Storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Running => "running",
            Self::Yoga => "yoga",
            Self::Swimming => "swimming",
            Self::Cycling => "cycling",
            Self::Nutrition => "nutrition",
            Self::Other => "other",
        }
    }

    /// Parses a storage label; unknown labels map to `Other`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "workout" => Self::Workout,
            "running" => Self::Running,
            "yoga" => Self::Yoga,
            "swimming" => Self::Swimming,
            "cycling" => Self::Cycling,
            "nutrition" => Self::Nutrition,
            _ => Self::Other,
        }
    }

    /// Icon name used by the event card.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Workout => "dumbbell",
            Self::Running => "run",
            Self::Yoga => "yoga",
            Self::Swimming => "pool",
            Self::Cycling => "bike",
            Self::Nutrition => "apple",
            Self::Other => "calendar-check",
        }
    }

    /// Accent color (hex) used by the event card.
    pub fn color(self) -> &'static str {
        match self {
            Self::Workout => "#4A90E2",
            Self::Running => "#e74c3c",
            Self::Yoga => "#9b59b6",
            Self::Swimming => "#3498db",
            Self::Cycling => "#f39c12",
            Self::Nutrition => "#27ae60",
            Self::Other => "#4A90E2",
        }
    }
}

/// Calendar event as stored and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw timestamp text (`YYYY-MM-DD`, RFC 3339, or naive datetime).
    pub date: String,
    /// Serialized as `type` to match the stored document shape.
    #[serde(rename = "type")]
    pub event_type: EventType,
}

impl CalendarEvent {
    /// Creates a new event with a generated stable ID.
    pub fn new(title: impl Into<String>, date: impl Into<String>, event_type: EventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            date: date.into(),
            event_type,
        }
    }

    /// Creates an event with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(
        id: EventId,
        title: impl Into<String>,
        date: impl Into<String>,
        event_type: EventType,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        Ok(Self {
            id,
            ..Self::new(title, date, event_type)
        })
    }

    /// Validates write-path invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        if parse_record_date(&self.date).is_none() {
            return Err(ValidationError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }

    /// Returns `HH:MM` when the stored timestamp carries a time of day.
    pub fn display_time(&self) -> Option<String> {
        if !has_time_component(&self.date) {
            return None;
        }
        parse_record_datetime(&self.date).map(|value| value.format("%H:%M").to_string())
    }
}

impl DatedRecord for CalendarEvent {
    fn record_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    fn record_type(&self) -> &str {
        self.event_type.as_str()
    }
}
