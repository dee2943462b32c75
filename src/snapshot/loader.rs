use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, Weekday};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use crate::config::WeeklyRule;
use crate::engine::calendar::parse_day;
use crate::error::{EngineError, EngineResult};
use crate::models::{Challenge, Frequency, Habit, HabitStatus, WeekdaySet};

// ─── Raw records (wire shape) ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    #[serde(default)]
    pub selected_days: Vec<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub completion_dates: Vec<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_frequency() -> String {
    "daily".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub habit_ids: Vec<String>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
}

/// JSON document handed over by the backend layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub habits: Vec<HabitRecord>,
    #[serde(default)]
    pub challenges: Vec<ChallengeRecord>,
    /// Habits of every challenge participant, keyed by participant id.
    #[serde(default)]
    pub participants: BTreeMap<String, Vec<HabitRecord>>,
}

// ─── Conversion ──────────────────────────────────────────────────────────────

fn parse_frequency(
    raw: &str,
    selected: &[String],
    weekly: WeeklyRule,
) -> Result<Frequency> {
    let frequency = match raw.to_lowercase().as_str() {
        "daily" => Frequency::Daily,
        "weekly" => match weekly {
            WeeklyRule::StartWeek => Frequency::Weekly,
            WeeklyRule::EveryWeek => Frequency::EveryWeek,
        },
        "selected_days" | "selecteddays" | "selected-days" => {
            let days = selected
                .iter()
                .map(|s| {
                    Weekday::from_str(s.trim()).map_err(|_| anyhow!("Unknown weekday '{}'", s))
                })
                .collect::<Result<Vec<_>>>()?;
            Frequency::SelectedDays(days.into_iter().collect::<WeekdaySet>())
        }
        other => {
            warn!("Unknown frequency '{}', treating as daily", other);
            Frequency::Daily
        }
    };
    Ok(frequency)
}

impl HabitRecord {
    pub fn into_habit(self, weekly: WeeklyRule) -> Result<Habit> {
        let id = self.id;
        let start_date = parse_day(&self.start_date)
            .with_context(|| format!("Habit '{}' start_date", id))?;
        let end_date = self
            .end_date
            .as_deref()
            .map(parse_day)
            .transpose()
            .with_context(|| format!("Habit '{}' end_date", id))?;
        let completion_dates = self
            .completion_dates
            .iter()
            .map(|s| parse_day(s))
            .collect::<EngineResult<BTreeSet<NaiveDate>>>()
            .with_context(|| format!("Habit '{}' completion_dates", id))?;
        let frequency = parse_frequency(&self.frequency, &self.selected_days, weekly)
            .with_context(|| format!("Habit '{}' selected_days", id))?;
        let status = HabitStatus::from_str(&self.status)?;

        Ok(Habit {
            name: if self.name.is_empty() { id.clone() } else { self.name },
            id,
            frequency,
            start_date,
            end_date,
            completion_dates,
            status,
        })
    }
}

impl ChallengeRecord {
    pub fn into_challenge(self) -> Result<Challenge> {
        let id = self.id;
        let start_date = parse_day(&self.start_date)
            .with_context(|| format!("Challenge '{}' start_date", id))?;
        let end_date = parse_day(&self.end_date)
            .with_context(|| format!("Challenge '{}' end_date", id))?;
        if end_date < start_date {
            return Err(EngineError::InvalidRange {
                start: start_date,
                end: end_date,
            })
            .with_context(|| format!("Challenge '{}'", id));
        }

        Ok(Challenge {
            name: if self.name.is_empty() { id.clone() } else { self.name },
            id,
            start_date,
            end_date,
            habit_ids: self.habit_ids.into_iter().collect(),
            participant_ids: self.participant_ids,
        })
    }
}

// ─── Validated snapshot ──────────────────────────────────────────────────────

/// Validated, engine-ready view of a [`SnapshotFile`].
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub challenges: Vec<Challenge>,
    pub participants: BTreeMap<String, Vec<Habit>>,
}

impl Snapshot {
    pub fn from_file(file: SnapshotFile, weekly: WeeklyRule) -> Result<Self> {
        let habits = file
            .habits
            .into_iter()
            .map(|h| h.into_habit(weekly))
            .collect::<Result<Vec<_>>>()?;
        let challenges = file
            .challenges
            .into_iter()
            .map(ChallengeRecord::into_challenge)
            .collect::<Result<Vec<_>>>()?;
        let mut participants = BTreeMap::new();
        for (participant, records) in file.participants {
            let list = records
                .into_iter()
                .map(|h| h.into_habit(weekly))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Participant '{}'", participant))?;
            participants.insert(participant, list);
        }
        Ok(Self {
            habits,
            challenges,
            participants,
        })
    }

    pub fn parse(json: &str, weekly: WeeklyRule) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json).context("Parsing snapshot JSON")?;
        Self::from_file(file, weekly)
    }

    pub fn load(path: &Path, weekly: WeeklyRule) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Reading snapshot {:?}", path))?;
        let snapshot = Self::parse(&content, weekly)?;
        debug!(
            "Loaded snapshot {:?}: {} habits, {} challenges, {} participants",
            path,
            snapshot.habits.len(),
            snapshot.challenges.len(),
            snapshot.participants.len()
        );
        Ok(snapshot)
    }

    pub fn habit(&self, id: &str) -> Result<&Habit> {
        self.habits
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| anyhow!("Habit '{}' not found", id))
    }

    pub fn challenge(&self, id: &str) -> Result<&Challenge> {
        self.challenges
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| anyhow!("Challenge '{}' not found", id))
    }

}
