//! Domain model for calendar, diet and fitness records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Centralize write-path validation errors.
//!
//! # Invariants
//! - Every stored record is identified by a stable UUID.
//! - Models never reach into storage; repositories call `validate()`.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event;
pub mod fitness;
pub mod food;
pub mod record;

pub use event::{CalendarEvent, EventId, EventType};
pub use fitness::{CommunityPost, UserProfile, WeightEntry, WorkoutRecord};
pub use food::{empty_meal_buckets, FoodEntry, MealBuckets, DEFAULT_MEAL_SLOTS};
pub use record::{parse_record_date, DatedRecord};

/// Write-path validation failure for any domain record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Identifier is the nil UUID.
    NilId,
    /// Required text field is empty after trimming.
    EmptyField(&'static str),
    /// Timestamp text cannot be parsed into a calendar day.
    InvalidDate(String),
    /// Numeric field must be zero or greater.
    NegativeValue { field: &'static str, value: f64 },
    /// Body weight must be strictly positive.
    NonPositiveWeight(f64),
    /// Month sits at the edge of the representable range and has no full grid.
    MonthOutOfRange(NaiveDate),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidDate(raw) => write!(f, "invalid date `{raw}`"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} ({value}) must be >= 0")
            }
            Self::NonPositiveWeight(value) => write!(f, "weight_kg ({value}) must be > 0"),
            Self::MonthOutOfRange(date) => {
                write!(f, "month of {date} is outside the supported calendar range")
            }
        }
    }
}

impl Error for ValidationError {}
