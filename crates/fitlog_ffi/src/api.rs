//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use fitlog_core::db::open_db;
use fitlog_core::nutrition::CustomFoodForm;
use fitlog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddEventRequest, CalendarEvent, CalendarService, DietService, EventType, FitnessService,
    FoodCatalog, NutritionGoals, SqliteDietRepository, SqliteEventRepository,
    SqliteFitnessRepository,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "fitlog.sqlite3";
const DB_PATH_ENV: &str = "FITLOG_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One rendered calendar cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCellItem {
    pub date: String,
    pub is_today: bool,
    pub is_current_month: bool,
    pub is_weekend: bool,
    pub event_count: u32,
}

/// Month grid envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    pub ok: bool,
    /// Always 42 cells on success, empty on failure.
    pub cells: Vec<GridCellItem>,
    pub message: String,
}

/// Calendar event as shown by the event card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub event_id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    /// `HH:MM` when the event has a time of day.
    pub time: Option<String>,
    pub event_type: String,
    pub icon: String,
    pub color: String,
}

/// Event list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub ok: bool,
    pub items: Vec<EventItem>,
    pub message: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    pub ok: bool,
    /// Created record ID, when the action creates one.
    pub record_id: Option<String>,
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, record_id: Option<String>) -> Self {
        Self {
            ok: true,
            record_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Catalog search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSearchItem {
    pub food_id: u32,
    pub name: String,
    pub calories: f64,
    pub unit: String,
}

/// Diet screen envelope for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DietSummaryResponse {
    pub ok: bool,
    pub calories: u32,
    pub carbs: u32,
    pub fat: u32,
    pub protein: u32,
    pub calorie_goal: u32,
    pub remaining_calories: i64,
    pub progress: f64,
    /// Entry count per meal slot, in slot-label order.
    pub meal_counts: Vec<MealCountItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCountItem {
    pub meal_slot: String,
    pub entries: u32,
}

impl DietSummaryResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            calories: 0,
            carbs: 0,
            fat: 0,
            protein: 0,
            calorie_goal: 0,
            remaining_calories: 0,
            progress: 0.0,
            meal_counts: Vec::new(),
            message: message.into(),
        }
    }
}

/// Builds the 42-cell month grid with per-day event counts.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `today` is the shell's local date; it decides the `is_today` flag.
#[flutter_rust_bridge::frb(sync)]
pub fn month_grid(year: i32, month: u32, today: String) -> MonthGridResponse {
    let result = (|| -> Result<Vec<GridCellItem>, String> {
        let reference = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| format!("invalid month {year}-{month}"))?;
        let today = parse_day(&today)?;
        with_connection(|conn| {
            let service = CalendarService::new(
                SqliteEventRepository::try_new(conn).map_err(|err| err.to_string())?,
            );
            let overview = service
                .month_overview(reference, today)
                .map_err(|err| err.to_string())?;
            Ok(overview
                .view
                .cells
                .iter()
                .map(|cell| GridCellItem {
                    date: cell.date.to_string(),
                    is_today: cell.is_today,
                    is_current_month: cell.is_current_month,
                    is_weekend: cell.is_weekend,
                    event_count: u32::try_from(cell.event_count).unwrap_or(u32::MAX),
                })
                .collect())
        })
    })();

    match result {
        Ok(cells) => MonthGridResponse {
            ok: true,
            cells,
            message: String::new(),
        },
        Err(err) => MonthGridResponse {
            ok: false,
            cells: Vec::new(),
            message: format!("month_grid failed: {err}"),
        },
    }
}

/// Adds a calendar event.
///
/// `event_type` accepts `workout|running|yoga|swimming|cycling|nutrition`;
/// anything else is stored as `other`.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_add_event(
    title: String,
    description: Option<String>,
    date: String,
    event_type: String,
) -> EntryActionResponse {
    let request = AddEventRequest {
        title,
        description,
        date,
        event_type: EventType::from_label(&event_type),
    };
    let result = with_connection(|conn| {
        let repo = SqliteEventRepository::try_new(conn).map_err(|err| err.to_string())?;
        CalendarService::new(repo)
            .add_event(&request)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(event) => EntryActionResponse::success("Event added.", Some(event.id.to_string())),
        Err(err) => EntryActionResponse::failure(format!("calendar_add_event failed: {err}")),
    }
}

/// Deletes a calendar event by ID.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_delete_event(event_id: String) -> EntryActionResponse {
    let result = Uuid::parse_str(event_id.trim())
        .map_err(|_| format!("invalid event id `{event_id}`"))
        .and_then(|id| {
            with_connection(|conn| {
                let repo =
                    SqliteEventRepository::try_new(conn).map_err(|err| err.to_string())?;
                CalendarService::new(repo)
                    .delete_event(id)
                    .map_err(|err| err.to_string())
            })
        });
    match result {
        Ok(()) => EntryActionResponse::success("Event deleted.", None),
        Err(err) => EntryActionResponse::failure(format!("calendar_delete_event failed: {err}")),
    }
}

/// Lists events on one day for the detail sheet.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_events_for_date(date: String) -> EventListResponse {
    let result = parse_day(&date).and_then(|day| {
        with_connection(|conn| {
            let repo = SqliteEventRepository::try_new(conn).map_err(|err| err.to_string())?;
            CalendarService::new(repo)
                .events_on(day)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(events) => EventListResponse {
            ok: true,
            message: if events.is_empty() {
                "No events.".to_string()
            } else {
                format!("Found {} event(s).", events.len())
            },
            items: events.iter().map(to_event_item).collect(),
        },
        Err(err) => EventListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("calendar_events_for_date failed: {err}"),
        },
    }
}

/// Searches the built-in food catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn food_search(query: String) -> Vec<FoodSearchItem> {
    FoodCatalog::builtin()
        .search(&query)
        .into_iter()
        .map(|item| FoodSearchItem {
            food_id: item.id,
            name: item.name.clone(),
            calories: item.calories,
            unit: item.unit.clone(),
        })
        .collect()
}

/// Logs `amount` units of a catalog food into a meal slot.
#[flutter_rust_bridge::frb(sync)]
pub fn diet_log_catalog_food(
    date: String,
    meal_slot: String,
    food_id: u32,
    amount: f64,
) -> EntryActionResponse {
    let result = parse_day(&date).and_then(|day| {
        with_connection(|conn| {
            let repo = SqliteDietRepository::try_new(conn).map_err(|err| err.to_string())?;
            DietService::new(repo)
                .log_catalog_food(day, &meal_slot, food_id, amount)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => EntryActionResponse::success("Food logged.", Some(id.to_string())),
        Err(err) => EntryActionResponse::failure(format!("diet_log_catalog_food failed: {err}")),
    }
}

/// Logs a hand-entered food. Numeric fields are parsed leniently.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn diet_log_custom_food(
    date: String,
    meal_slot: String,
    name: String,
    calories: String,
    carbs: String,
    fat: String,
    protein: String,
    amount: String,
) -> EntryActionResponse {
    let form = CustomFoodForm {
        name,
        calories,
        carbs,
        fat,
        protein,
        amount,
    };
    let result = parse_day(&date).and_then(|day| {
        with_connection(|conn| {
            let repo = SqliteDietRepository::try_new(conn).map_err(|err| err.to_string())?;
            DietService::new(repo)
                .log_custom_food(day, &meal_slot, &form)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(id) => EntryActionResponse::success("Custom food logged.", Some(id.to_string())),
        Err(err) => EntryActionResponse::failure(format!("diet_log_custom_food failed: {err}")),
    }
}

/// Day totals, calorie ring and meal counts.
///
/// Goals come from `user_id`'s profile when given, else the defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn diet_day_summary(
    date: String,
    user_id: Option<String>,
    exercise_calories: u32,
) -> DietSummaryResponse {
    let result = parse_day(&date).and_then(|day| {
        with_connection(|conn| {
            let goals = match user_id.as_deref().map(str::trim) {
                Some(user_id) if !user_id.is_empty() => {
                    let repo =
                        SqliteFitnessRepository::try_new(conn).map_err(|err| err.to_string())?;
                    let profile = FitnessService::new(repo)
                        .profile(user_id)
                        .map_err(|err| err.to_string())?;
                    NutritionGoals::from(&profile)
                }
                _ => NutritionGoals::default(),
            };
            let repo = SqliteDietRepository::try_new(conn).map_err(|err| err.to_string())?;
            DietService::new(repo)
                .day_summary(day, &goals, exercise_calories)
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(summary) => DietSummaryResponse {
            ok: true,
            calories: summary.totals.calories,
            carbs: summary.totals.carbs,
            fat: summary.totals.fat,
            protein: summary.totals.protein,
            calorie_goal: summary.budget.goal,
            remaining_calories: summary.budget.remaining,
            progress: summary.budget.progress,
            meal_counts: summary
                .buckets
                .iter()
                .map(|(slot, entries)| MealCountItem {
                    meal_slot: slot.clone(),
                    entries: u32::try_from(entries.len()).unwrap_or(u32::MAX),
                })
                .collect(),
            message: String::new(),
        },
        Err(err) => DietSummaryResponse::failure(format!("diet_day_summary failed: {err}")),
    }
}

fn to_event_item(event: &CalendarEvent) -> EventItem {
    EventItem {
        event_id: event.id.to_string(),
        title: event.title.clone(),
        description: event.description.clone(),
        date: event.date.clone(),
        time: event.display_time(),
        event_type: event.event_type.as_str().to_string(),
        icon: event.event_type.icon().to_string(),
        color: event.event_type.color().to_string(),
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{raw}`; expected YYYY-MM-DD"))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error_code=db_open_failed");
        format!("DB open failed: {err}")
    })?;
    f(&conn)
}
