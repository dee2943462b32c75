use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Totals for one habit or one participant over an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub total_days: u32,
    pub total_completions: u32,
    /// Whole percent in `0..=100`.
    pub completion_rate: u32,
}

/// One cell of a habit calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDay {
    pub date: NaiveDate,
    pub due: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub completion_percentage: f64,
}

impl DailyCompletion {
    /// Only exactly 100 counts as a perfect day.
    pub fn is_perfect(&self) -> bool {
        self.completion_percentage == 100.0
    }
}

/// Per-day completion percentages of one participant in a challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantCompletionRecord {
    pub participant_id: String,
    pub days: Vec<DailyCompletion>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionStats {
    pub average_completion: f64,
    pub perfect_days: u32,
    pub total_completions: u32,
    pub total_days: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub participant_id: String,
    /// Dense rank starting at 1; tied participants share a rank.
    pub rank: u32,
    pub is_creator: bool,
    pub stats: CompletionStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeReport {
    pub challenge_id: String,
    pub ranked: Vec<ParticipantStats>,
    pub series: Vec<ParticipantCompletionRecord>,
}

impl ChallengeReport {
    pub fn series_for(&self, participant_id: &str) -> Option<&ParticipantCompletionRecord> {
        self.series
            .iter()
            .find(|r| r.participant_id == participant_id)
    }
}
