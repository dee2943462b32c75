pub mod loader;

pub use loader::{ChallengeRecord, HabitRecord, Snapshot, SnapshotFile};
