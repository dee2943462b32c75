use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde::Serialize;

use crate::cli::args::{ConfigCommands, WeeklyRuleArg};
use crate::config::{AppConfig, WeeklyRule};
use crate::engine::calendar::{ensure_span_within, format_day, parse_day};
use crate::engine::{
    aggregate_habit, compose_challenge, current_streak, habit_calendar, is_due, podium, streak,
};
use crate::models::{CompletionSummary, Habit, ParticipantStats};
use crate::snapshot::Snapshot;
use crate::utils::format::{day_glyph, format_average, format_days, percent_glyph, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Session ─────────────────────────────────────────────────────────────────

/// Everything a report needs: the loaded snapshot, limits and "today".
pub struct Session {
    pub snapshot: Snapshot,
    pub config: AppConfig,
    pub today: NaiveDate,
    pub json: bool,
}

impl Session {
    pub fn new(snapshot: Snapshot, config: AppConfig, today: NaiveDate, json: bool) -> Self {
        Self {
            snapshot,
            config,
            today,
            json,
        }
    }

    fn guard(&self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        ensure_span_within(start, end, self.config.limits.max_interval_days)
            .context("Interval rejected")
    }

    /// Streak scans run from the habit start to today.
    fn guard_streak(&self, habit: &Habit) -> Result<()> {
        if habit.start_date <= self.today {
            self.guard(habit.start_date, self.today)?;
        }
        Ok(())
    }
}

/// Resolve `--today`, falling back to the local date.
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => Ok(parse_day(s).context("Parsing --today")?),
        None => Ok(Local::now().date_naive()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("Serializing report")?);
    Ok(())
}

// ─── Habits ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HabitLine<'a> {
    id: &'a str,
    name: &'a str,
    status: &'static str,
    frequency: String,
    due_today: bool,
    done_today: bool,
    /// None when the streak interval exceeds the configured limit.
    streak: Option<u32>,
}

fn habit_lines(session: &Session, include_deleted: bool) -> Vec<HabitLine<'_>> {
    let today = session.today;
    session
        .snapshot
        .habits
        .iter()
        .filter(|h| include_deleted || h.is_active())
        .map(|habit| {
            let streak = match session.guard_streak(habit) {
                Ok(()) => Some(current_streak(habit, today)),
                Err(e) => {
                    warn!("Skipping streak for '{}': {:#}", habit.id, e);
                    None
                }
            };
            HabitLine {
                id: &habit.id,
                name: &habit.name,
                status: habit.status.as_str(),
                frequency: habit.frequency.to_string(),
                due_today: is_due(habit, today),
                done_today: habit.is_completed_on(today),
                streak,
            }
        })
        .collect()
}

pub fn handle_habits(session: &Session, include_deleted: bool) -> Result<()> {
    let today = session.today;
    let lines = habit_lines(session, include_deleted);

    if session.json {
        return print_json(&lines);
    }

    println!();
    println_colored!(GOLD, "  Habits — {}", format_day(today));
    println!();
    if lines.is_empty() {
        println_colored!(DIM, "  No habits");
    }
    for line in &lines {
        let mark = match (line.due_today, line.done_today) {
            (_, true) => format!("{}✓\x1b[0m", GREEN),
            (true, false) => format!("{}○\x1b[0m", AMBER),
            (false, false) => format!("{}·\x1b[0m", DIM),
        };
        let streak = line
            .streak
            .map(format_days)
            .unwrap_or_else(|| "range too long".to_string());
        println!(
            "  {}  {:<24}  {:<8}  {:<28}  {}",
            mark, line.name, line.status, line.frequency, streak
        );
    }
    println!();
    Ok(())
}

// ─── Due ─────────────────────────────────────────────────────────────────────

pub fn handle_due(session: &Session, habit_id: &str, date: Option<&str>) -> Result<()> {
    let habit = session.snapshot.habit(habit_id)?;
    let date = match date {
        Some(s) => parse_day(s).context("Parsing --date")?,
        None => session.today,
    };
    let due = is_due(habit, date);

    if session.json {
        #[derive(Serialize)]
        struct DueReport<'a> {
            habit: &'a str,
            date: NaiveDate,
            due: bool,
        }
        return print_json(&DueReport {
            habit: &habit.id,
            date,
            due,
        });
    }

    if due {
        println_colored!(GREEN, "  {} is due on {}", habit.name, format_day(date));
    } else {
        println_colored!(DIM, "  {} is not due on {}", habit.name, format_day(date));
    }
    Ok(())
}

// ─── Streak ──────────────────────────────────────────────────────────────────

pub fn handle_streak(session: &Session, habit_id: &str) -> Result<()> {
    let habit = session.snapshot.habit(habit_id)?;
    session.guard_streak(habit)?;
    let s = streak(habit, session.today);
    debug!("Streak for {}: {:?}", habit.id, s);

    if session.json {
        return print_json(&s);
    }

    // Bar fills at 30 days
    let bar = progress_bar(s.current.min(30), 30, 12);
    println!();
    println_colored!(GOLD, "  {}", habit.name);
    println!();
    println_colored!(GREEN, "  {}  {}", bar, format_days(s.current));
    println_colored!(DIM, "  Best: {}", format_days(s.best));
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(
    session: &Session,
    habit_id: &str,
    from: Option<&str>,
    to: Option<&str>,
    calendar: bool,
) -> Result<()> {
    let habit = session.snapshot.habit(habit_id)?;
    let start = match from {
        Some(s) => parse_day(s).context("Parsing --from")?,
        None => habit.start_date.min(session.today),
    };
    let end = match to {
        Some(s) => parse_day(s).context("Parsing --to")?,
        None => session.today,
    };
    session.guard(start, end)?;

    let summary = aggregate_habit(habit, start, end)?;
    let days = if calendar {
        Some(habit_calendar(habit, start, end)?)
    } else {
        None
    };

    if session.json {
        #[derive(Serialize)]
        struct StatsReport<'a> {
            habit: &'a str,
            from: NaiveDate,
            to: NaiveDate,
            #[serde(flatten)]
            summary: CompletionSummary,
            #[serde(skip_serializing_if = "Option::is_none")]
            calendar: Option<Vec<crate::models::HabitDay>>,
        }
        return print_json(&StatsReport {
            habit: &habit.id,
            from: start,
            to: end,
            summary,
            calendar: days,
        });
    }

    println!();
    println_colored!(
        GOLD,
        "  {} — {} to {}",
        habit.name,
        format_day(start),
        format_day(end)
    );
    println!();
    println_colored!(
        BOLD,
        "  {}  {}%",
        progress_bar(summary.completion_rate, 100, 20),
        summary.completion_rate
    );
    println!("  Due days:     {}", summary.total_days);
    println!("  Completions:  {}", summary.total_completions);

    if let Some(days) = days {
        println!();
        println_colored!(DIM, "  (● = done, ○ = missed, ◆ = extra, · = off)");
        for week in days.chunks(7) {
            let row: Vec<&str> = week.iter().map(|d| day_glyph(d.due, d.completed)).collect();
            println!("  {}  {}", format_day(week[0].date), row.join(" "));
        }
    }
    println!();
    Ok(())
}

// ─── Challenge ───────────────────────────────────────────────────────────────

fn ranked_line(p: &ParticipantStats) -> String {
    let creator = if p.is_creator { " (creator)" } else { "" };
    format!(
        "  #{:<3} {:<20} {:>7}  {} perfect{}",
        p.rank,
        p.participant_id,
        format_average(p.stats.average_completion),
        p.stats.perfect_days,
        creator
    )
}

pub fn handle_challenge(session: &Session, challenge_id: &str, only_podium: bool) -> Result<()> {
    let challenge = session.snapshot.challenge(challenge_id)?;
    let end = challenge.elapsed_end(session.today);
    if challenge.start_date <= end {
        session.guard(challenge.start_date, end)?;
    }
    let report = compose_challenge(challenge, &session.snapshot.participants, session.today);

    if session.json {
        if only_podium {
            return print_json(&podium(&report.ranked));
        }
        return print_json(&report);
    }

    println!();
    println_colored!(
        GOLD,
        "  {} — {} to {}",
        challenge.name,
        format_day(challenge.start_date),
        format_day(challenge.end_date)
    );
    println!();

    if report.ranked.is_empty() {
        println_colored!(DIM, "  No participants");
        println!();
        return Ok(());
    }

    if only_podium {
        for (place, group) in podium(&report.ranked).iter().enumerate() {
            let names: Vec<&str> = group.iter().map(|p| p.participant_id.as_str()).collect();
            println_colored!(BOLD, "  {}.  {}", place + 1, names.join(", "));
        }
        println!();
        return Ok(());
    }

    for p in &report.ranked {
        println_colored!(BOLD, "{}", ranked_line(p));
        if let Some(series) = report.series_for(&p.participant_id) {
            let row: Vec<&str> = series
                .days
                .iter()
                .map(|d| percent_glyph(d.completion_percentage))
                .collect();
            println_colored!(DIM, "        {}", row.join(" "));
        }
    }
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &mut AppConfig, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let content = toml::to_string_pretty(config).context("Serializing config")?;
            println!("# {}", AppConfig::config_path()?.display());
            println!("{}", content);
        }
        ConfigCommands::Set {
            weekly_rule,
            max_interval_days,
            snapshot_path,
        } => {
            if let Some(rule) = weekly_rule {
                config.recurrence.weekly_rule = match rule {
                    WeeklyRuleArg::StartWeek => WeeklyRule::StartWeek,
                    WeeklyRuleArg::EveryWeek => WeeklyRule::EveryWeek,
                };
            }
            if let Some(max) = max_interval_days {
                anyhow::ensure!(*max > 0, "max-interval-days must be positive");
                config.limits.max_interval_days = *max;
            }
            if let Some(path) = snapshot_path {
                config.snapshot.path = Some(path.clone());
            }
            config.save()?;
            println_colored!(GREEN, "  ✓ Configuration saved");
        }
    }
    Ok(())
}
