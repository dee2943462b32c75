//! Cadence - recurrence, streak and progress analytics for habit tracking.
//!
//! The [`engine`] module holds the pure computations: whether a habit is due
//! on a date, its current and best streak, completion totals over an interval,
//! and ranked statistics for challenge participants. Everything else
//! ([`snapshot`], [`config`], [`cli`]) feeds validated snapshots into it and
//! presents the results.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod utils;

pub use error::{EngineError, EngineResult};
pub use models::*;
