pub mod settings;

pub use settings::{AppConfig, LimitsConfig, RecurrenceConfig, SnapshotConfig, WeeklyRule};
