//! Sunday-first 6x7 month grid.
//!
//! # Invariants
//! - A grid always holds exactly `GRID_CELLS` consecutive days.
//! - The first cell is the Sunday on or before the 1st of the month.
//! - Every day of the target month appears exactly once, contiguously.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// 42 consecutive calendar days covering one month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<NaiveDate>,
}

impl MonthGrid {
    /// Builds the grid for the month containing `reference`.
    ///
    /// The day-of-month of `reference` is ignored. Returns `None` for the
    /// first and last months chrono can represent, where the leading Sunday
    /// or the 42nd day does not exist.
    pub fn build(reference: NaiveDate) -> Option<Self> {
        let first = first_day_of_month(reference);
        let lead = u64::from(first.weekday().num_days_from_sunday());
        let start = first.checked_sub_days(Days::new(lead))?;
        let cells: Vec<NaiveDate> = start.iter_days().take(GRID_CELLS).collect();
        (cells.len() == GRID_CELLS).then(|| Self {
            year: first.year(),
            month: first.month(),
            cells,
        })
    }

    /// Year of the month this grid renders.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month (1-12) this grid renders.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[NaiveDate] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First (Sunday) cell.
    pub fn first(&self) -> Option<NaiveDate> {
        self.cells.first().copied()
    }

    /// Last (Saturday) cell.
    pub fn last(&self) -> Option<NaiveDate> {
        self.cells.last().copied()
    }

    /// Six rows of seven days, Sunday to Saturday.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Cell index of `date`, if it is on the grid.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        let start = self.first()?;
        let offset = usize::try_from((date - start).num_days()).ok()?;
        (offset < self.cells.len()).then_some(offset)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }
}

/// Builds the 42-day grid for the month containing `reference`.
///
/// `None` only at the edges of the representable date range.
pub fn build_month_grid(reference: NaiveDate) -> Option<MonthGrid> {
    MonthGrid::build(reference)
}

pub fn first_day_of_month(reference: NaiveDate) -> NaiveDate {
    reference - Days::new(u64::from(reference.day0()))
}

pub fn last_day_of_month(reference: NaiveDate) -> NaiveDate {
    first_day_of_month(reference)
        .checked_add_months(Months::new(1))
        .and_then(|next_first| next_first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Moves `reference` by `delta` months, clamping the day to the target
/// month's length (Jan 31 + 1 month -> Feb 28/29).
pub fn shift_month(reference: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        reference.checked_add_months(months)
    } else {
        reference.checked_sub_months(months)
    };
    shifted.unwrap_or(reference)
}

/// `true` iff `date` is the caller's "today".
///
/// `today` is resolved once per render so every cell sees the same value.
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// `true` iff `date` falls in the same year and month as `reference`.
pub fn is_current_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// `true` for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
