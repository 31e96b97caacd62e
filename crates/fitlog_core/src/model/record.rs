//! Shared contract for records that carry a calendar timestamp.
//!
//! # Responsibility
//! - Define how bucketing code reads a record's calendar day and type tag.
//! - Parse the timestamp shapes the record store hands back.
//!
//! # Invariants
//! - An unparseable timestamp yields `None`; callers exclude such records
//!   instead of failing the whole aggregation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Record with a calendar timestamp and a free-form type tag.
pub trait DatedRecord {
    /// Local calendar day of the record, or `None` when the stored timestamp
    /// cannot be parsed.
    fn record_date(&self) -> Option<NaiveDate>;

    /// Category/type tag as stored (for example `workout` or `nutrition`).
    fn record_type(&self) -> &str;
}

impl<T: DatedRecord + ?Sized> DatedRecord for &T {
    fn record_date(&self) -> Option<NaiveDate> {
        (**self).record_date()
    }

    fn record_type(&self) -> &str {
        (**self).record_type()
    }
}

/// Parses a stored timestamp into its local calendar day.
///
/// Accepted shapes:
/// - `YYYY-MM-DD`
/// - RFC 3339 (`2024-03-05T07:30:00+08:00`); the offset-local day is kept
/// - `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS`
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    parse_record_datetime(raw).map(|value| value.date())
}

/// Parses a stored timestamp, keeping the time of day when present.
///
/// Date-only input resolves to midnight.
pub fn parse_record_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(value.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(value);
        }
    }
    None
}

/// Returns `true` when the raw timestamp carries a time-of-day component.
pub fn has_time_component(raw: &str) -> bool {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err()
        && parse_record_datetime(trimmed).is_some()
}

#[cfg(test)]
mod tests {
    use super::{has_time_component, parse_record_date, parse_record_datetime};
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_record_date("2024-02-29"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn rfc3339_keeps_local_day_of_offset() {
        assert_eq!(
            parse_record_date("2024-03-05T23:30:00+08:00"),
            Some(ymd(2024, 3, 5))
        );
    }

    #[test]
    fn naive_datetime_keeps_time() {
        let value = parse_record_datetime("2024-03-05T07:45:00").expect("parse");
        assert_eq!(value.format("%H:%M").to_string(), "07:45");
    }

    #[test]
    fn garbage_and_impossible_dates_are_rejected() {
        assert_eq!(parse_record_date("yesterday"), None);
        assert_eq!(parse_record_date("2023-02-29"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn time_component_detection() {
        assert!(!has_time_component("2024-03-05"));
        assert!(has_time_component("2024-03-05T07:45:00"));
        assert!(!has_time_component("not a date"));
    }
}
