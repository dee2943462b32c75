//! Pure analytics over habit and challenge snapshots.
//!
//! Nothing in here performs I/O, logs, or keeps state between calls.

pub mod aggregate;
pub mod calendar;
pub mod compose;
pub mod recurrence;
pub mod streak;

pub use aggregate::{aggregate_daily_series, aggregate_habit, completion_rate, habit_calendar};
pub use calendar::{day_floor, days_between_inclusive, ensure_span_within, parse_day, week_bucket};
pub use compose::{compose_challenge, completion_stats, participant_series, podium, rank_participants};
pub use recurrence::{due_dates, is_due, is_due_at};
pub use streak::{best_streak, current_streak, streak};
