//! Render-ready month view: grid cells decorated with flags and event counts.

use crate::calendar::bucket::bucket_by_day;
use crate::calendar::grid::{is_current_month, is_today, is_weekend, MonthGrid};
use crate::model::DatedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell of the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_current_month: bool,
    pub is_weekend: bool,
    pub event_count: usize,
}

impl DayCell {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Month grid plus per-cell decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub reference: NaiveDate,
    pub cells: Vec<DayCell>,
}

impl MonthView {
    /// Builds the view for the month of `reference`.
    ///
    /// `today` is passed in once so every cell is judged against the same day.
    /// `None` when the month has no full grid (see `MonthGrid::build`).
    pub fn build<R: DatedRecord>(
        reference: NaiveDate,
        today: NaiveDate,
        events: &[R],
    ) -> Option<Self> {
        MonthGrid::build(reference).map(|grid| Self::from_grid(&grid, reference, today, events))
    }

    /// Decorates an already built grid.
    pub fn from_grid<R: DatedRecord>(
        grid: &MonthGrid,
        reference: NaiveDate,
        today: NaiveDate,
        events: &[R],
    ) -> Self {
        let by_day = bucket_by_day(events);
        let cells = grid
            .cells()
            .iter()
            .map(|&date| DayCell {
                date,
                is_today: is_today(date, today),
                is_current_month: is_current_month(date, reference),
                is_weekend: is_weekend(date),
                event_count: by_day.get(&date).map_or(0, Vec::len),
            })
            .collect();
        Self { reference, cells }
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(crate::calendar::grid::DAYS_PER_WEEK)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthView;
    use crate::model::{CalendarEvent, EventType};
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn cells_carry_flags_and_counts() {
        let events = vec![
            CalendarEvent::new("run", "2024-06-03T07:00:00", EventType::Running),
            CalendarEvent::new("yoga", "2024-06-03", EventType::Yoga),
            CalendarEvent::new("swim", "2024-07-02", EventType::Swimming),
        ];
        let view = MonthView::build(ymd(2024, 6, 1), ymd(2024, 6, 3), &events).expect("grid");
        assert_eq!(view.cells.len(), 42);

        let busy = view.cell(ymd(2024, 6, 3)).expect("on grid");
        assert!(busy.is_today);
        assert!(busy.is_current_month);
        assert_eq!(busy.event_count, 2);

        let trailing = view.cell(ymd(2024, 7, 2)).expect("trailing day on grid");
        assert!(!trailing.is_current_month);
        assert!(trailing.has_events());

        assert_eq!(view.cells.iter().filter(|cell| cell.is_today).count(), 1);
        assert!(view.weeks().all(|week| week[0].is_weekend && week[6].is_weekend));
    }
}
