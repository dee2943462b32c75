//! Snapshot loading feeding straight into the engine.

use std::io::Write;

use cadence::config::WeeklyRule;
use cadence::engine::{compose_challenge, ensure_span_within, is_due, podium, streak};
use cadence::snapshot::Snapshot;
use cadence::{EngineError, Frequency};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const SNAPSHOT: &str = r#"{
    "habits": [
        {
            "id": "journal",
            "name": "Journal",
            "frequency": "daily",
            "start_date": "2024-06-01",
            "end_date": "2024-06-30",
            "completion_dates": [
                "2024-06-01", "2024-06-02", "2024-06-03T21:10:00+02:00",
                "2024-06-05", "2024-06-06", "2024-06-07"
            ]
        },
        {
            "id": "review",
            "name": "Weekly review",
            "frequency": "weekly",
            "start_date": "2024-06-05",
            "completion_dates": ["2024-06-05"]
        }
    ],
    "challenges": [
        {
            "id": "june",
            "name": "June sprint",
            "start_date": "2024-06-01",
            "end_date": "2024-06-04",
            "habit_ids": ["journal", "stretch"],
            "participant_ids": ["ana", "ben", "cyd"]
        }
    ],
    "participants": {
        "ana": [
            { "id": "journal", "start_date": "2024-06-01",
              "completion_dates": ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04"] },
            { "id": "stretch", "start_date": "2024-06-01",
              "completion_dates": ["2024-06-01", "2024-06-02"] }
        ],
        "ben": [
            { "id": "journal", "start_date": "2024-06-01",
              "completion_dates": ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04"] },
            { "id": "stretch", "start_date": "2024-06-01",
              "completion_dates": ["2024-06-03", "2024-06-04"] }
        ],
        "cyd": [
            { "id": "journal", "start_date": "2024-06-01", "completion_dates": ["2024-06-01"] }
        ]
    }
}"#;

fn write_snapshot() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SNAPSHOT.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_disk_and_compute_streak() {
    let file = write_snapshot();
    let snap = Snapshot::load(file.path(), WeeklyRule::StartWeek).unwrap();

    let journal = snap.habit("journal").unwrap();
    let s = streak(journal, d("2024-06-07"));
    assert_eq!(s.current, 3);
    assert_eq!(s.best, 3);
    assert!(!is_due(journal, d("2024-07-01")));
}

#[test]
fn test_weekly_rule_changes_due_days() {
    let file = write_snapshot();

    let compat = Snapshot::load(file.path(), WeeklyRule::StartWeek).unwrap();
    let review = compat.habit("review").unwrap();
    assert_eq!(review.frequency, Frequency::Weekly);
    assert!(is_due(review, d("2024-06-09")));
    assert!(!is_due(review, d("2024-06-12")));

    let corrected = Snapshot::load(file.path(), WeeklyRule::EveryWeek).unwrap();
    let review = corrected.habit("review").unwrap();
    assert!(!is_due(review, d("2024-06-09")));
    assert!(is_due(review, d("2024-06-12")));
}

#[test]
fn test_challenge_from_snapshot_groups_ties() {
    let snap = Snapshot::parse(SNAPSHOT, WeeklyRule::StartWeek).unwrap();
    let challenge = snap.challenge("june").unwrap();
    let report = compose_challenge(challenge, &snap.participants, d("2024-06-30"));

    let ranks: Vec<(&str, u32)> = report
        .ranked
        .iter()
        .map(|p| (p.participant_id.as_str(), p.rank))
        .collect();
    // ana: 100, 100, 50, 50 / ben: 50, 50, 100, 100 / cyd tracks journal only: 100, 0, 0, 0
    assert_eq!(ranks, vec![("ana", 1), ("ben", 1), ("cyd", 2)]);
    assert_eq!(report.ranked[0].stats.average_completion, 75.0);
    assert_eq!(report.ranked[2].stats.completion_rate, 25);

    let places = podium(&report.ranked);
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].len(), 2);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Snapshot::load(&dir.path().join("absent.json"), WeeklyRule::StartWeek).is_err());
}

#[test]
fn test_interval_guard_rejects_decades() {
    let err = ensure_span_within(d("1990-01-01"), d("2024-01-01"), 3660).unwrap_err();
    assert!(matches!(err, EngineError::IntervalTooLarge { max: 3660, .. }));
}
