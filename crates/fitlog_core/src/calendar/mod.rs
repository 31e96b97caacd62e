//! Calendar month grid and date bucketing.
//!
//! # Responsibility
//! - Build the Sunday-first 42-day grid for a month view.
//! - Filter dated records by month, day or range.
//! - Decorate grid cells for rendering.
//!
//! # Invariants
//! - Pure and deterministic; "today" is always an explicit argument.

pub mod bucket;
pub mod grid;
pub mod view;

pub use bucket::{bucket_by_day, events_for_date, events_for_month, events_in_range};
pub use grid::{
    build_month_grid, first_day_of_month, is_current_month, is_today, is_weekend,
    last_day_of_month, shift_month, MonthGrid, GRID_CELLS,
};
pub use view::{DayCell, MonthView};
