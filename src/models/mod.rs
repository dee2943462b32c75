pub mod challenge;
pub mod habit;
pub mod stats;

pub use challenge::Challenge;
pub use habit::{Frequency, Habit, HabitStatus, WeekdaySet};
pub use stats::{
    ChallengeReport, CompletionStats, CompletionSummary, DailyCompletion, HabitDay,
    ParticipantCompletionRecord, ParticipantStats, Streak,
};
