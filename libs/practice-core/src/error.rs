//! Error types for practice-core.

use crate::types::PracticeMode;
use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Invalid-state usage of a practice session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session already complete after {answered} answers")]
    AlreadyComplete { answered: usize },

    #[error("session not complete: {answered} of {total} words answered")]
    NotComplete { answered: usize, total: usize },

    #[error("{actual:?} answer submitted to a {expected:?} session")]
    ModeMismatch {
        expected: PracticeMode,
        actual: PracticeMode,
    },
}
