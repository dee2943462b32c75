use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    /// Inclusive; never before `start_date` once loaded.
    pub end_date: NaiveDate,
    pub habit_ids: BTreeSet<String>,
    /// First entry is the creator. Order has no effect on ranking.
    pub participant_ids: Vec<String>,
}

impl Challenge {
    pub fn creator(&self) -> Option<&str> {
        self.participant_ids.first().map(String::as_str)
    }

    pub fn is_creator(&self, participant_id: &str) -> bool {
        self.creator() == Some(participant_id)
    }

    pub fn includes_habit(&self, habit_id: &str) -> bool {
        self.habit_ids.contains(habit_id)
    }

    /// Last day counted when looking at the challenge on `today`.
    pub fn elapsed_end(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.min(today)
    }
}
