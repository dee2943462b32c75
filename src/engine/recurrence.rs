//! Due-date predicate for habit recurrence rules.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::engine::calendar::{day_floor, days_between_inclusive, week_bucket};
use crate::error::EngineResult;
use crate::models::{Frequency, Habit};

/// Whether `habit` should be performed on `date`.
///
/// Completion state plays no part here. Status is also ignored; callers
/// filter deleted habits themselves.
pub fn is_due(habit: &Habit, date: NaiveDate) -> bool {
    let start = habit.start_date;
    if date < start {
        return false;
    }
    if let Some(end) = habit.end_date {
        if date > end {
            return false;
        }
    }

    match habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => week_bucket(date) == week_bucket(start),
        Frequency::SelectedDays(days) => days.contains(date.weekday()),
        Frequency::EveryWeek => date.weekday() == start.weekday(),
    }
}

pub fn is_due_at(habit: &Habit, at: NaiveDateTime) -> bool {
    is_due(habit, day_floor(at))
}

/// Due days of `habit` within `start..=end`.
pub fn due_dates(habit: &Habit, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<NaiveDate>> {
    Ok(days_between_inclusive(start, end)?
        .into_iter()
        .filter(|d| is_due(habit, *d))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekdaySet;
    use chrono::Weekday;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn daily_is_due_from_start_onwards() {
        let habit = Habit::new("h", Frequency::Daily, d("2024-01-10"));
        assert!(!is_due(&habit, d("2024-01-09")));
        assert!(is_due(&habit, d("2024-01-10")));
        for day in days_between_inclusive(d("2024-01-10"), d("2025-01-10")).unwrap() {
            assert!(is_due(&habit, day), "{} should be due", day);
        }
    }

    #[test]
    fn end_date_is_inclusive() {
        let mut habit = Habit::new("h", Frequency::Daily, d("2024-01-01"));
        habit.end_date = Some(d("2024-01-31"));
        assert!(is_due(&habit, d("2024-01-31")));
        assert!(!is_due(&habit, d("2024-02-01")));
    }

    #[test]
    fn weekly_is_due_only_in_start_week() {
        // 2024-01-03 is a Wednesday in ISO week 1 (Mon 01-01 .. Sun 01-07).
        let habit = Habit::new("h", Frequency::Weekly, d("2024-01-03"));
        assert!(!is_due(&habit, d("2024-01-02")));
        assert!(is_due(&habit, d("2024-01-03")));
        assert!(is_due(&habit, d("2024-01-07")));
        assert!(!is_due(&habit, d("2024-01-08")));
        assert!(!is_due(&habit, d("2024-01-10")));
        // Same week number one year later is a different bucket.
        assert!(!is_due(&habit, d("2025-01-01")));
    }

    #[test]
    fn every_week_repeats_on_start_weekday() {
        let habit = Habit::new("h", Frequency::EveryWeek, d("2024-01-03"));
        assert!(is_due(&habit, d("2024-01-03")));
        assert!(!is_due(&habit, d("2024-01-04")));
        assert!(is_due(&habit, d("2024-01-10")));
        assert!(is_due(&habit, d("2024-06-05")));
    }

    #[test]
    fn selected_days_follow_weekday_set() {
        let days: WeekdaySet = [Weekday::Mon, Weekday::Wed].into_iter().collect();
        let habit = Habit::new("h", Frequency::SelectedDays(days), d("2024-01-01"));
        assert!(is_due(&habit, d("2024-01-01")));
        assert!(!is_due(&habit, d("2024-01-02")));
        assert!(is_due(&habit, d("2024-01-03")));
        assert!(!is_due(&habit, d("2024-01-07")));
    }

    #[test]
    fn empty_selection_is_never_due() {
        let habit = Habit::new("h", Frequency::SelectedDays(WeekdaySet::EMPTY), d("2024-01-01"));
        for day in days_between_inclusive(d("2023-12-01"), d("2024-12-31")).unwrap() {
            assert!(!is_due(&habit, day));
        }
    }

    #[test]
    fn timestamp_is_floored() {
        let habit = Habit::new("h", Frequency::Daily, d("2024-01-10"));
        let at = d("2024-01-10").and_hms_opt(23, 59, 0).unwrap();
        assert!(is_due_at(&habit, at));
        let before = d("2024-01-09").and_hms_opt(23, 59, 59).unwrap();
        assert!(!is_due_at(&habit, before));
    }

    #[test]
    fn due_dates_filters_interval() {
        let days: WeekdaySet = [Weekday::Sat, Weekday::Sun].into_iter().collect();
        let habit = Habit::new("h", Frequency::SelectedDays(days), d("2024-01-01"));
        let due = due_dates(&habit, d("2024-01-01"), d("2024-01-14")).unwrap();
        assert_eq!(
            due,
            vec![d("2024-01-06"), d("2024-01-07"), d("2024-01-13"), d("2024-01-14")]
        );
        assert!(due_dates(&habit, d("2024-01-14"), d("2024-01-01")).is_err());
    }
}
