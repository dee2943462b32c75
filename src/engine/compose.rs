//! Cross-participant statistics for shared challenges.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::engine::aggregate::aggregate_daily_series;
use crate::models::{
    Challenge, ChallengeReport, CompletionStats, DailyCompletion, Habit,
    ParticipantCompletionRecord, ParticipantStats,
};

/// Averages are kept to six decimal places so that equal day multisets
/// compare equal regardless of summation order.
const AVERAGE_SCALE: f64 = 1e6;
const PODIUM_PLACES: usize = 3;

/// Daily completion percentages of one participant, from the challenge start
/// through the earlier of its end and `today`.
///
/// A day's percentage is the share of the participant's active challenge
/// habits completed that day. Deleted habits are left out entirely.
pub fn participant_series(
    challenge: &Challenge,
    participant_id: &str,
    habits: &[Habit],
    today: NaiveDate,
) -> ParticipantCompletionRecord {
    let tracked: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.is_active() && challenge.includes_habit(&h.id))
        .collect();
    let end = challenge.elapsed_end(today);

    let days = challenge
        .start_date
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let done = tracked.iter().filter(|h| h.is_completed_on(date)).count();
            let completion_percentage = if tracked.is_empty() {
                0.0
            } else {
                done as f64 * 100.0 / tracked.len() as f64
            };
            DailyCompletion {
                date,
                completion_percentage,
            }
        })
        .collect();

    ParticipantCompletionRecord {
        participant_id: participant_id.to_string(),
        days,
    }
}

fn score_key(average: f64) -> i64 {
    (average * AVERAGE_SCALE).round() as i64
}

/// Mean daily percentage, rounded to six decimal places.
pub fn completion_stats(record: &ParticipantCompletionRecord) -> CompletionStats {
    let summary = aggregate_daily_series(&record.days);
    let average_completion = if record.days.is_empty() {
        0.0
    } else {
        let mean = record
            .days
            .iter()
            .map(|d| d.completion_percentage)
            .sum::<f64>()
            / record.days.len() as f64;
        score_key(mean) as f64 / AVERAGE_SCALE
    };
    let perfect_days = record.days.iter().filter(|d| d.is_perfect()).count() as u32;

    CompletionStats {
        average_completion,
        perfect_days,
        total_completions: summary.total_completions,
        total_days: summary.total_days,
        completion_rate: summary.completion_rate,
    }
}

/// Rank participants by average completion, highest first.
///
/// Ties share a dense rank (1, 1, 2, ...) and keep the order of `records`.
pub fn rank_participants(
    challenge: &Challenge,
    records: &[ParticipantCompletionRecord],
) -> Vec<ParticipantStats> {
    let mut scored: Vec<(&ParticipantCompletionRecord, CompletionStats)> = records
        .iter()
        .map(|r| (r, completion_stats(r)))
        .collect();
    // Stable sort on the same key used for grouping keeps tied records in order.
    scored.sort_by_key(|(_, stats)| std::cmp::Reverse(score_key(stats.average_completion)));

    let mut ranked = Vec::with_capacity(scored.len());
    let mut rank = 0u32;
    let mut group_key: Option<i64> = None;
    for (record, stats) in scored {
        let key = score_key(stats.average_completion);
        if group_key != Some(key) {
            rank += 1;
            group_key = Some(key);
        }
        ranked.push(ParticipantStats {
            participant_id: record.participant_id.clone(),
            rank,
            is_creator: challenge.is_creator(&record.participant_id),
            stats,
        });
    }
    ranked
}

/// Full challenge view: ranking plus every participant's raw series.
///
/// Participants without an entry in `participants` are scored at 0%.
pub fn compose_challenge(
    challenge: &Challenge,
    participants: &BTreeMap<String, Vec<Habit>>,
    today: NaiveDate,
) -> ChallengeReport {
    let series: Vec<ParticipantCompletionRecord> = challenge
        .participant_ids
        .iter()
        .map(|id| {
            let habits = participants.get(id).map(Vec::as_slice).unwrap_or(&[]);
            participant_series(challenge, id, habits, today)
        })
        .collect();
    let ranked = rank_participants(challenge, &series);

    ChallengeReport {
        challenge_id: challenge.id.clone(),
        ranked,
        series,
    }
}

/// The first three rank groups of an already ranked list.
pub fn podium(ranked: &[ParticipantStats]) -> Vec<Vec<&ParticipantStats>> {
    let mut places: Vec<Vec<&ParticipantStats>> = Vec::new();
    for entry in ranked {
        match places.last_mut() {
            Some(group) if group[0].rank == entry.rank => group.push(entry),
            _ => {
                if places.len() == PODIUM_PLACES {
                    break;
                }
                places.push(vec![entry]);
            }
        }
    }
    places
}
