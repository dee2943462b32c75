use anyhow::{Context, Result};
use clap::Parser;

use cadence::cli::args::{Cli, Commands};
use cadence::cli::handlers::{self, Session};
use cadence::config::AppConfig;
use cadence::snapshot::Snapshot;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    match &cli.command {
        // Config changes don't need a snapshot
        Commands::Config { action } => handlers::handle_config(&mut config, action)?,

        Commands::Habits { all } => {
            handlers::handle_habits(&open_session(&cli, config)?, *all)?;
        }
        Commands::Due { habit, date } => {
            handlers::handle_due(&open_session(&cli, config)?, habit, date.as_deref())?;
        }
        Commands::Streak { habit } => {
            handlers::handle_streak(&open_session(&cli, config)?, habit)?;
        }
        Commands::Stats {
            habit,
            from,
            to,
            calendar,
        } => {
            let session = open_session(&cli, config)?;
            handlers::handle_stats(&session, habit, from.as_deref(), to.as_deref(), *calendar)?;
        }
        Commands::Challenge { id, podium } => {
            handlers::handle_challenge(&open_session(&cli, config)?, id, *podium)?;
        }
    }

    Ok(())
}

/// Load the snapshot and resolve "today" for a report command.
fn open_session(cli: &Cli, config: AppConfig) -> Result<Session> {
    let snapshot_path = match &cli.snapshot {
        Some(path) => path.clone(),
        None => config.snapshot_path()?,
    };
    let snapshot = Snapshot::load(&snapshot_path, config.recurrence.weekly_rule)
        .with_context(|| format!("Loading snapshot at {:?}", snapshot_path))?;
    let today = handlers::resolve_today(cli.today.as_deref())?;
    Ok(Session::new(snapshot, config, today, cli.json))
}
