//! Day-granularity date helpers shared by every engine component.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Truncate a timestamp to its calendar day.
pub fn day_floor(at: NaiveDateTime) -> NaiveDate {
    at.date()
}

/// Parse a boundary date string into a calendar day.
///
/// Accepts `2024-01-05`, `2024-01-05T08:30:00` and RFC 3339 timestamps. An
/// offset-carrying timestamp keeps the wall-clock date of its own offset.
pub fn parse_day(input: &str) -> EngineResult<NaiveDate> {
    let s = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Ok(day_floor(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    Err(EngineError::InvalidDate(input.to_string()))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn check_order(start: NaiveDate, end: NaiveDate) -> EngineResult<()> {
    if end < start {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(())
}

/// Every day from `start` to `end`, both included, ascending.
pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<NaiveDate>> {
    check_order(start, end)?;
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Number of days in `start..=end`, or 0 when reversed.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        0
    } else {
        (end - start).num_days() + 1
    }
}

/// Reject reversed intervals and intervals longer than `max_days`.
pub fn ensure_span_within(start: NaiveDate, end: NaiveDate, max_days: i64) -> EngineResult<()> {
    check_order(start, end)?;
    let days = span_days(start, end);
    if days > max_days {
        return Err(EngineError::IntervalTooLarge { days, max: max_days });
    }
    Ok(())
}

/// ISO-8601 `(week, year)` of a day. The year is the ISO week-year, so
/// 2024-12-30 lands in `(1, 2025)`.
pub fn week_bucket(date: NaiveDate) -> (u32, i32) {
    let w = date.iso_week();
    (w.week(), w.year())
}
