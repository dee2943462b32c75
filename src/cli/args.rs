use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cadence", version, author, about = "Habit recurrence, streak and challenge statistics")]
pub struct Cli {
    /// Snapshot JSON to read (defaults to the configured path)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List habits with their current streak
    Habits {
        /// Include deleted habits
        #[arg(long)]
        all: bool,
    },
    /// Check whether a habit is due on a date
    Due {
        /// Habit id
        habit: String,
        /// Date to check (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show current and best streak of a habit
    Streak {
        /// Habit id
        habit: String,
    },
    /// Completion totals of a habit over an interval
    Stats {
        /// Habit id
        habit: String,
        /// First day of the interval (defaults to the habit start)
        #[arg(long)]
        from: Option<String>,
        /// Last day of the interval (defaults to today)
        #[arg(long)]
        to: Option<String>,
        /// Also print a day-by-day calendar
        #[arg(long)]
        calendar: bool,
    },
    /// Leaderboard and daily progress for a challenge
    Challenge {
        /// Challenge id
        id: String,
        /// Only show the podium
        #[arg(long)]
        podium: bool,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the active configuration
    Show,
    /// Update configuration values
    Set {
        /// How "weekly" habits recur
        #[arg(long, value_enum)]
        weekly_rule: Option<WeeklyRuleArg>,
        /// Longest interval accepted for streaks and stats
        #[arg(long)]
        max_interval_days: Option<i64>,
        /// Default snapshot location
        #[arg(long)]
        snapshot_path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum WeeklyRuleArg {
    StartWeek,
    EveryWeek,
}
