use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the analytics engine and its date boundary.
///
/// A zero-day interval is not an error: rate computations short-circuit to 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Interval of {days} days exceeds the limit of {max} days")]
    IntervalTooLarge { days: i64, max: i64 },
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
