//! Hand-off point for finished test results.

use std::sync::{Mutex, PoisonError};

use practice_core::{recent_practices, RecentPractice, TestResult};
use uuid::Uuid;

/// Stored result with its assigned id.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub id: Uuid,
    pub result: TestResult,
}

/// Append-only, in-memory result storage.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Mutex<Vec<StoredResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a finished result and assign it an id.
    pub fn save(&self, result: TestResult) -> Uuid {
        let id = Uuid::new_v4();
        tracing::info!(
            "Saved result {} for user {}: {}/{}",
            id,
            result.user_id,
            result.correct_count,
            result.total_count
        );
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredResult { id, result });
        id
    }

    pub fn for_user(&self, user_id: &str) -> Vec<TestResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|stored| stored.result.user_id == user_id)
            .map(|stored| stored.result.clone())
            .collect()
    }

    /// Newest results for a user, for the dashboard.
    pub fn recent(&self, user_id: &str, limit: usize) -> Vec<RecentPractice> {
        recent_practices(&self.for_user(user_id), limit)
    }
}
