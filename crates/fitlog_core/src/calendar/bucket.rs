//! Day and month bucketing for dated records.
//!
//! # Invariants
//! - Results are subsequences of the input; relative order is kept.
//! - Records whose date cannot be parsed are skipped, never fatal.
//! - Comparison is at day granularity; time of day is ignored.

use crate::calendar::grid::{first_day_of_month, last_day_of_month};
use crate::model::DatedRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Records dated within the month of `reference`, inclusive of both ends.
pub fn events_for_month<R: DatedRecord>(events: &[R], reference: NaiveDate) -> Vec<&R> {
    events_in_range(events, first_day_of_month(reference), last_day_of_month(reference))
}

/// Records dated exactly on `date`.
pub fn events_for_date<R: DatedRecord>(events: &[R], date: NaiveDate) -> Vec<&R> {
    events
        .iter()
        .filter(|event| event.record_date() == Some(date))
        .collect()
}

/// Records dated within `[from, to]` inclusive.
pub fn events_in_range<R: DatedRecord>(events: &[R], from: NaiveDate, to: NaiveDate) -> Vec<&R> {
    events
        .iter()
        .filter(|event| {
            event
                .record_date()
                .is_some_and(|day| from <= day && day <= to)
        })
        .collect()
}

/// Groups records by calendar day; unparseable records are dropped.
pub fn bucket_by_day<R: DatedRecord>(events: &[R]) -> BTreeMap<NaiveDate, Vec<&R>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&R>> = BTreeMap::new();
    for event in events {
        if let Some(day) = event.record_date() {
            buckets.entry(day).or_default().push(event);
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::{bucket_by_day, events_for_date, events_for_month, events_in_range};
    use crate::model::{CalendarEvent, EventType};
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn event(title: &str, date: &str) -> CalendarEvent {
        CalendarEvent::new(title, date, EventType::Workout)
    }

    fn sample() -> Vec<CalendarEvent> {
        vec![
            event("before", "2024-01-31T23:59:00"),
            event("first", "2024-02-01"),
            event("broken", "not-a-date"),
            event("leap", "2024-02-29T06:00:00"),
            event("after", "2024-03-01"),
        ]
    }

    fn titles(events: &[&CalendarEvent]) -> Vec<String> {
        events.iter().map(|event| event.title.clone()).collect()
    }

    #[test]
    fn month_is_inclusive_and_skips_bad_dates() {
        let events = sample();
        let february = events_for_month(&events, ymd(2024, 2, 10));
        assert_eq!(titles(&february), vec!["first", "leap"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let events: Vec<CalendarEvent> = Vec::new();
        assert!(events_for_month(&events, ymd(2024, 2, 1)).is_empty());
        assert!(events_for_date(&events, ymd(2024, 2, 1)).is_empty());
    }

    #[test]
    fn date_lookup_ignores_time_of_day() {
        let events = sample();
        assert_eq!(titles(&events_for_date(&events, ymd(2024, 2, 29))), vec!["leap"]);
        assert!(events_for_date(&events, ymd(2024, 2, 28)).is_empty());
    }

    #[test]
    fn event_is_found_only_on_its_own_day() {
        let events = vec![event("only", "2024-05-20T10:00:00")];
        let start = ymd(2024, 5, 1);
        for day in start.iter_days().take(60) {
            let hits = events_for_date(&events, day);
            assert_eq!(hits.len(), usize::from(day == ymd(2024, 5, 20)), "day {day}");
        }
    }

    #[test]
    fn range_and_day_buckets() {
        let events = sample();
        let span = events_in_range(&events, ymd(2024, 1, 31), ymd(2024, 2, 1));
        assert_eq!(titles(&span), vec!["before", "first"]);

        let buckets = bucket_by_day(&events);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[&ymd(2024, 2, 29)].len(), 1);
    }
}
