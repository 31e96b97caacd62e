//! Core domain logic for FitLog.
//! This crate is the single source of truth for calendar, diet and
//! fitness invariants shared by the mobile shell and the CLI.

pub mod calendar;
pub mod db;
pub mod logging;
pub mod model;
pub mod nutrition;
pub mod repo;
pub mod service;

pub use calendar::{
    build_month_grid, events_for_date, events_for_month, is_current_month, is_today, is_weekend,
    DayCell, MonthGrid, MonthView,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    CalendarEvent, CommunityPost, DatedRecord, EventId, EventType, FoodEntry, MealBuckets,
    UserProfile, ValidationError, WeightEntry, WorkoutRecord,
};
pub use nutrition::{sum_nutrition, CustomFoodForm, FoodCatalog, NutritionGoals, NutritionTotals};
pub use repo::diet_repo::{DietRepository, SqliteDietRepository};
pub use repo::event_repo::{EventListQuery, EventRepository, SqliteEventRepository};
pub use repo::fitness_repo::{FitnessRepository, SqliteFitnessRepository};
pub use repo::{RepoError, RepoResult};
pub use service::calendar_service::{AddEventRequest, CalendarService, MonthOverview};
pub use service::diet_service::{DaySummary, DietService, DietServiceError, WeeklyCalories};
pub use service::fitness_service::{DashboardSummary, FitnessService, WeightTrend};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
