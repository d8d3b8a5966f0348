//! Practice session engine shared by the backend and any other client.
//!
//! Provides:
//! - Fuzzy answer scoring for writing and listening modes (Levenshtein distance)
//! - Plausible wrong-answer generation for quiz mode
//! - A linear session controller driving one word at a time
//! - Result aggregation into a `TestResult` with grade and missed words
//! - Shared types (Word, Translation, PracticeMode, Grade, etc.)

pub mod distractor;
pub mod error;
pub mod matching;
pub mod results;
pub mod session;
pub mod types;

pub use distractor::{DistractorGenerator, DISTRACTOR_COUNT, MAX_DISTRACTOR_ATTEMPTS};
pub use error::{Result, SessionError};
pub use matching::{best_match, levenshtein_distance, score, MatchResult, MATCH_THRESHOLD};
pub use results::{accuracy, recent_practices, summarize, RecentPractice, RECENT_PRACTICE_LIMIT};
pub use session::{
    AnswerOutcome, PracticeContext, Progress, Prompt, SessionController, SessionPhase,
    SessionState, SpeechCue, GUEST_USER_ID,
};
pub use types::{ComplexWord, Grade, PracticeMode, TestResult, Translation, Word};
