//! Completion totals and rates over an interval.

use chrono::NaiveDate;

use crate::engine::calendar::days_between_inclusive;
use crate::engine::recurrence::is_due;
use crate::error::EngineResult;
use crate::models::{CompletionSummary, DailyCompletion, Habit, HabitDay};

/// Percentage of `total_days` covered by `completions`, as a whole number.
///
/// Rounds half away from zero using integer arithmetic, so 1/8 gives 13 and
/// 1/3 gives 33. Returns 0 when `total_days` is 0 and never exceeds 100.
pub fn completion_rate(completions: u32, total_days: u32) -> u32 {
    if total_days == 0 {
        return 0;
    }
    let c = u64::from(completions);
    let d = u64::from(total_days);
    let rate = (200 * c + d) / (2 * d);
    rate.min(100) as u32
}

fn summary(total_days: u32, total_completions: u32) -> CompletionSummary {
    CompletionSummary {
        total_days,
        total_completions,
        completion_rate: completion_rate(total_completions, total_days),
    }
}

/// Totals for one habit over `start..=end`.
///
/// `total_days` counts due days only. `total_completions` counts every
/// completion in the interval, off-day completions included.
pub fn aggregate_habit(
    habit: &Habit,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<CompletionSummary> {
    let days = days_between_inclusive(start, end)?;
    let due = days.iter().filter(|d| is_due(habit, **d)).count() as u32;
    let done = habit.completion_dates.range(start..=end).count() as u32;
    Ok(summary(due, done))
}

/// Totals for a per-day percentage series. Every day counts toward
/// `total_days`; a day counts as a completion when its percentage is above 0.
pub fn aggregate_daily_series(days: &[DailyCompletion]) -> CompletionSummary {
    let active = days
        .iter()
        .filter(|d| d.completion_percentage > 0.0)
        .count() as u32;
    summary(days.len() as u32, active)
}

/// Day-by-day due/completed grid for calendar views.
pub fn habit_calendar(habit: &Habit, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<HabitDay>> {
    Ok(days_between_inclusive(start, end)?
        .into_iter()
        .map(|date| HabitDay {
            date,
            due: is_due(habit, date),
            completed: habit.is_completed_on(date),
        })
        .collect())
}
