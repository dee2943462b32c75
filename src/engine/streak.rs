//! Consecutive-completion streaks over due days.

use chrono::NaiveDate;

use crate::engine::recurrence::is_due;
use crate::models::{Frequency, Habit, Streak};

fn never_due(habit: &Habit) -> bool {
    matches!(habit.frequency, Frequency::SelectedDays(days) if days.is_empty())
}

/// Current streak of `habit` as seen on `today`.
///
/// The scan starts at `today` when it is already completed, otherwise at
/// yesterday, so an unmarked today never breaks the streak. Off-days are
/// skipped; the first due day without a completion ends the scan.
pub fn current_streak(habit: &Habit, today: NaiveDate) -> u32 {
    if never_due(habit) {
        return 0;
    }

    let start = habit.start_date;
    let mut cursor = if habit.is_completed_on(today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut streak = 0u32;

    while let Some(day) = cursor {
        if day < start {
            break;
        }
        if is_due(habit, day) {
            if !habit.is_completed_on(day) {
                break;
            }
            streak += 1;
        }
        cursor = day.pred_opt();
    }
    streak
}

/// Longest run of completed due days between the start date and `today`.
pub fn best_streak(habit: &Habit, today: NaiveDate) -> u32 {
    if never_due(habit) || today < habit.start_date {
        return 0;
    }

    let mut best = 0u32;
    let mut run = 0u32;
    for day in habit.start_date.iter_days().take_while(|d| *d <= today) {
        if !is_due(habit, day) {
            continue;
        }
        if habit.is_completed_on(day) {
            run += 1;
            best = best.max(run);
        } else if day != today {
            run = 0;
        }
    }
    best
}

pub fn streak(habit: &Habit, today: NaiveDate) -> Streak {
    Streak {
        current: current_streak(habit, today),
        best: best_streak(habit, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekdaySet;
    use chrono::Weekday;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn daily_with(start: &str, done: &[&str]) -> Habit {
        let mut habit = Habit::new("h", Frequency::Daily, d(start));
        habit.completion_dates = done.iter().map(|s| d(s)).collect();
        habit
    }

    #[test]
    fn unmarked_today_does_not_break_streak() {
        let habit = daily_with("2024-01-01", &["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(current_streak(&habit, d("2024-01-04")), 3);
    }

    #[test]
    fn completed_today_is_counted() {
        let habit = daily_with("2024-01-01", &["2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(current_streak(&habit, d("2024-01-04")), 3);
    }

    #[test]
    fn missed_yesterday_resets() {
        let habit = daily_with("2024-01-01", &["2024-01-01", "2024-01-02"]);
        assert_eq!(current_streak(&habit, d("2024-01-04")), 0);
    }

    #[test]
    fn future_start_has_no_streak() {
        let habit = daily_with("2024-02-01", &["2024-01-30"]);
        assert_eq!(current_streak(&habit, d("2024-01-31")), 0);
        assert_eq!(best_streak(&habit, d("2024-01-31")), 0);
    }

    #[test]
    fn scan_stops_at_start_date() {
        // Completions before the start are never reached.
        let habit = daily_with("2024-01-03", &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04"]);
        assert_eq!(current_streak(&habit, d("2024-01-04")), 2);
    }

    #[test]
    fn off_days_are_skipped() {
        let days: WeekdaySet = [Weekday::Fri].into_iter().collect();
        let mut habit = Habit::new("h", Frequency::SelectedDays(days), d("2024-01-01"));
        habit.completion_dates = [d("2024-01-05"), d("2024-01-12"), d("2024-01-19")]
            .into_iter()
            .collect();
        assert_eq!(current_streak(&habit, d("2024-01-24")), 3);
    }

    #[test]
    fn off_day_completion_neither_extends_nor_breaks() {
        let days: WeekdaySet = [Weekday::Mon].into_iter().collect();
        let mut habit = Habit::new("h", Frequency::SelectedDays(days), d("2024-01-01"));
        habit.completion_dates = [d("2024-01-01"), d("2024-01-03"), d("2024-01-08")]
            .into_iter()
            .collect();
        assert_eq!(current_streak(&habit, d("2024-01-09")), 2);
    }

    #[test]
    fn never_due_habit_has_zero_streak() {
        let mut habit = Habit::new("h", Frequency::SelectedDays(WeekdaySet::EMPTY), d("2024-01-01"));
        habit.completion_dates = [d("2024-01-01"), d("2024-01-02")].into_iter().collect();
        assert_eq!(streak(&habit, d("2024-01-02")), Streak::default());
    }

    #[test]
    fn weekly_streak_ends_after_start_week() {
        let mut habit = Habit::new("h", Frequency::Weekly, d("2024-01-01"));
        habit.completion_dates = days_of("2024-01-01", 7);
        // Everything after the start week is an off-day.
        assert_eq!(current_streak(&habit, d("2024-03-01")), 7);
    }

    #[test]
    fn best_streak_tracks_longest_run() {
        let habit = daily_with(
            "2024-01-01",
            &[
                "2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04",
                "2024-01-06", "2024-01-07",
            ],
        );
        let s = streak(&habit, d("2024-01-08"));
        assert_eq!(s.current, 2);
        assert_eq!(s.best, 4);
    }

    #[test]
    fn best_is_never_below_current() {
        let habit = daily_with("2024-01-01", &["2024-01-03", "2024-01-04", "2024-01-05"]);
        for today in days_of("2024-01-01", 10) {
            let s = streak(&habit, today);
            assert!(s.best >= s.current, "on {}: {:?}", today, s);
        }
    }

    fn days_of(start: &str, n: usize) -> std::collections::BTreeSet<NaiveDate> {
        d(start).iter_days().take(n).collect()
    }
}
