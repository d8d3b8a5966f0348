//! Aggregation of finished sessions into test results.

use crate::error::{Result, SessionError};
use crate::session::{PracticeContext, SessionState};
use crate::types::{ComplexWord, Grade, TestResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Results shown in a recent practice list.
pub const RECENT_PRACTICE_LIMIT: usize = 6;

/// Percentage of correct answers, 0 when there was nothing to answer.
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

/// Build the result for a completed session.
///
/// Missed words are taken from the finalized outcomes, one entry per word in
/// queue order.
pub fn summarize(
    context: &PracticeContext,
    state: &SessionState,
    ended_at: DateTime<Utc>,
) -> Result<TestResult> {
    let words = state.words();
    let outcomes = state.outcomes();

    if !state.is_complete() {
        return Err(SessionError::NotComplete {
            answered: outcomes.len(),
            total: words.len(),
        });
    }

    let complex_words = words
        .iter()
        .zip(outcomes)
        .filter(|(_, outcome)| !outcome.correct)
        .map(|(word, outcome)| ComplexWord {
            word_id: word.id.clone(),
            value: word.value.clone(),
            correct_translations: word.canonical_translations(),
            user_translation: outcome.submitted_text().to_string(),
            match_score: outcome.match_score(),
            attempts: 1,
        })
        .collect();

    let result = TestResult {
        word_list_id: context.word_list_id.clone(),
        user_id: context.user_id().to_string(),
        date: ended_at,
        correct_count: state.correct_count(),
        total_count: words.len(),
        duration: seconds_between(state.started_at(), ended_at),
        complex_words,
    };

    tracing::info!(
        session_id = %context.session_id,
        correct = result.correct_count,
        total = result.total_count,
        grade = %result.grade().as_char(),
        "practice session summarized"
    );

    Ok(result)
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let elapsed = end.signed_duration_since(start);
    let seconds = match elapsed.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => elapsed.num_milliseconds() as f64 / 1_000.0,
    };
    seconds.max(0.0)
}

/// Dashboard line for one stored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPractice {
    pub word_list_id: String,
    pub date: DateTime<Utc>,
    pub grade: Grade,
    pub correct_count: usize,
    pub total_count: usize,
    pub duration_minutes: i64,
}

impl From<&TestResult> for RecentPractice {
    fn from(result: &TestResult) -> Self {
        Self {
            word_list_id: result.word_list_id.clone(),
            date: result.date,
            grade: result.grade(),
            correct_count: result.correct_count,
            total_count: result.total_count,
            duration_minutes: result.duration_minutes(),
        }
    }
}

/// Newest results first, at most `limit` of them.
pub fn recent_practices(results: &[TestResult], limit: usize) -> Vec<RecentPractice> {
    let mut sorted: Vec<&TestResult> = results.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().take(limit).map(RecentPractice::from).collect()
}
