//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from practice-core
pub use practice_core::{
    AnswerOutcome, ComplexWord, Grade, PracticeMode, Progress, Prompt, RecentPractice, SpeechCue,
    TestResult, Translation, Word,
};

/// Prompt detached from its session, ready to serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptView {
    pub index: usize,
    pub total: usize,
    pub mode: PracticeMode,
    pub word: Word,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechCue>,
}

impl From<Prompt<'_>> for PromptView {
    fn from(prompt: Prompt<'_>) -> Self {
        Self {
            index: prompt.index,
            total: prompt.total,
            mode: prompt.mode,
            word: prompt.word.clone(),
            options: prompt.options.map(<[String]>::to_vec),
            speech: prompt.speech,
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub word_list_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub mode: PracticeMode,
    pub words: Vec<Word>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub mode: PracticeMode,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub prompt: PromptResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptView>,
}

impl From<Option<Prompt<'_>>> for PromptResponse {
    fn from(prompt: Option<Prompt<'_>>) -> Self {
        Self {
            complete: prompt.is_none(),
            prompt: prompt.map(PromptView::from),
        }
    }
}

/// Flashcards send `correct`; every other mode sends `response`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub outcome: AnswerOutcome,
    pub correct_translations: Vec<String>,
    pub progress: Progress,
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TestResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentResultsQuery {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentResultsResponse {
    pub user_id: String,
    pub results: Vec<RecentPractice>,
}
