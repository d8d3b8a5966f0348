//! Linear practice session: one word at a time, in a fixed order.

use crate::distractor::DistractorGenerator;
use crate::error::{Result, SessionError};
use crate::matching::best_match;
use crate::types::{PracticeMode, TestResult, Word};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id recorded for sessions without a signed-in user.
pub const GUEST_USER_ID: &str = "guest";

/// Speech language when the first translation carries no tag.
pub const DEFAULT_SPEECH_LANGUAGE: &str = "en-US";

/// Who is practicing which list, passed explicitly into each session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeContext {
    pub session_id: String,
    pub word_list_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl PracticeContext {
    pub fn new(session_id: impl Into<String>, word_list_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            word_list_id: word_list_id.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// The signed-in user, or [`GUEST_USER_ID`].
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(GUEST_USER_ID)
    }
}

/// How one word was answered, uniform across modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub mode: PracticeMode,
    pub correct: bool,
    /// Match score, present only for writing and listening.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    /// Typed text or selected option. Flashcards capture no text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl AnswerOutcome {
    /// Self-reported flashcard result.
    pub fn flashcard(correct: bool) -> Self {
        Self {
            mode: PracticeMode::Flashcards,
            correct,
            score: None,
            response: None,
        }
    }

    /// Typed answer, fuzzy-matched against every translation.
    pub fn writing(word: &Word, text: &str) -> Self {
        Self::typed(PracticeMode::Writing, word, text)
    }

    /// Transcribed answer, scored like writing.
    pub fn listening(word: &Word, text: &str) -> Self {
        Self::typed(PracticeMode::Listening, word, text)
    }

    /// Selected option, compared exactly against the first translation only.
    pub fn quiz(word: &Word, selected: &str) -> Self {
        let correct = word
            .primary_translation()
            .is_some_and(|t| t.value == selected);
        Self {
            mode: PracticeMode::Quiz,
            correct,
            score: None,
            response: Some(selected.to_string()),
        }
    }

    fn typed(mode: PracticeMode, word: &Word, text: &str) -> Self {
        let result = best_match(text, &word.translations);
        Self {
            mode,
            correct: result.is_correct,
            score: Some(result.score),
            response: Some(text.to_string()),
        }
    }

    /// Score reported in results, 0 when nothing was scored.
    pub fn match_score(&self) -> u8 {
        self.score.unwrap_or(0)
    }

    /// Raw submitted text, empty for flashcards.
    pub fn submitted_text(&self) -> &str {
        self.response.as_deref().unwrap_or_default()
    }
}

impl From<bool> for AnswerOutcome {
    fn from(correct: bool) -> Self {
        Self::flashcard(correct)
    }
}

/// Controller state: answering word `index`, or done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionPhase {
    Active { index: usize },
    Complete,
}

/// Word queue plus append-only outcomes, owned by one controller.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    queue: Vec<Word>,
    phase: SessionPhase,
    outcomes: Vec<AnswerOutcome>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    fn new(queue: Vec<Word>, started_at: DateTime<Utc>) -> Self {
        let phase = if queue.is_empty() {
            SessionPhase::Complete
        } else {
            SessionPhase::Active { index: 0 }
        };
        Self {
            outcomes: Vec::with_capacity(queue.len()),
            queue,
            phase,
            started_at,
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.queue
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Position of the current word; equals the queue length once complete.
    pub fn index(&self) -> usize {
        match self.phase {
            SessionPhase::Active { index } => index,
            SessionPhase::Complete => self.queue.len(),
        }
    }

    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }
}

/// What the UI needs to speak a word in listening mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechCue {
    pub text: String,
    pub language: String,
}

/// Rendering data for the current word.
#[derive(Debug, Clone, Serialize)]
pub struct Prompt<'a> {
    pub index: usize,
    pub total: usize,
    pub mode: PracticeMode,
    pub word: &'a Word,
    /// Quiz options, stable until the session advances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<SpeechCue>,
}

/// Progress bar snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based position of the current word, capped at `total`.
    pub position: usize,
    pub total: usize,
    pub correct: usize,
}

#[derive(Debug, Clone)]
struct QuizOptions {
    index: usize,
    options: Vec<String>,
}

/// Drives one practice session from the first word to completion.
#[derive(Debug, Clone)]
pub struct SessionController {
    context: PracticeContext,
    mode: PracticeMode,
    state: SessionState,
    distractors: DistractorGenerator,
    quiz_options: Option<QuizOptions>,
}

impl SessionController {
    /// Start a session over `words` in the order given.
    pub fn new(
        context: PracticeContext,
        mode: PracticeMode,
        words: Vec<Word>,
        started_at: DateTime<Utc>,
    ) -> Self {
        tracing::debug!(
            session_id = %context.session_id,
            mode = mode.as_str(),
            words = words.len(),
            "practice session started"
        );
        Self {
            context,
            mode,
            state: SessionState::new(words, started_at),
            distractors: DistractorGenerator::new(),
            quiz_options: None,
        }
    }

    /// Replace the distractor source, e.g. with a seeded one.
    pub fn with_distractors(mut self, distractors: DistractorGenerator) -> Self {
        self.distractors = distractors;
        self
    }

    pub fn context(&self) -> &PracticeContext {
        &self.context
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn current_word(&self) -> Option<&Word> {
        match self.state.phase {
            SessionPhase::Active { index } => self.state.queue.get(index),
            SessionPhase::Complete => None,
        }
    }

    /// Prompt for the current word, `None` once complete.
    ///
    /// Quiz options are generated on the first call for a word and reused
    /// until the session advances.
    pub fn current_prompt(&mut self) -> Option<Prompt<'_>> {
        let SessionPhase::Active { index } = self.state.phase else {
            return None;
        };

        let cached = matches!(&self.quiz_options, Some(quiz) if quiz.index == index);
        if self.mode == PracticeMode::Quiz && !cached {
            let correct = self.state.queue[index]
                .primary_translation()
                .map(|t| t.value.as_str())
                .unwrap_or_default();
            let options = self.distractors.options(correct);
            self.quiz_options = Some(QuizOptions { index, options });
        }

        let word = &self.state.queue[index];
        let speech = (self.mode == PracticeMode::Listening).then(|| SpeechCue {
            text: word.value.clone(),
            language: word
                .primary_translation()
                .and_then(|t| t.language.clone())
                .unwrap_or_else(|| DEFAULT_SPEECH_LANGUAGE.to_string()),
        });

        Some(Prompt {
            index,
            total: self.state.queue.len(),
            mode: self.mode,
            word,
            options: self.quiz_options.as_ref().map(|quiz| quiz.options.as_slice()),
            speech,
        })
    }

    /// Judge a raw response to the current word in this session's mode.
    ///
    /// Returns `None` once complete, and in flashcards mode where only a
    /// self-report is meaningful.
    pub fn evaluate(&self, response: &str) -> Option<AnswerOutcome> {
        let word = self.current_word()?;
        match self.mode {
            PracticeMode::Flashcards => None,
            PracticeMode::Writing => Some(AnswerOutcome::writing(word, response)),
            PracticeMode::Listening => Some(AnswerOutcome::listening(word, response)),
            PracticeMode::Quiz => Some(AnswerOutcome::quiz(word, response)),
        }
    }

    /// Record the outcome for the current word and advance.
    ///
    /// Fails without touching state once the session is complete, or when
    /// the outcome belongs to another mode. A bare `bool` counts for any mode.
    pub fn submit_answer(&mut self, outcome: impl Into<AnswerOutcome>) -> Result<SessionPhase> {
        let SessionPhase::Active { index } = self.state.phase else {
            tracing::warn!(
                session_id = %self.context.session_id,
                "answer submitted to a completed session"
            );
            return Err(SessionError::AlreadyComplete {
                answered: self.state.outcomes.len(),
            });
        };

        let mut outcome = outcome.into();
        if outcome.mode != self.mode {
            // A bare self-report carries no mode-specific data
            if outcome.score.is_none() && outcome.response.is_none() {
                outcome.mode = self.mode;
            } else {
                tracing::warn!(
                    session_id = %self.context.session_id,
                    expected = %self.mode.as_str(),
                    actual = %outcome.mode.as_str(),
                    "answer from another mode rejected"
                );
                return Err(SessionError::ModeMismatch {
                    expected: self.mode,
                    actual: outcome.mode,
                });
            }
        }

        tracing::debug!(
            session_id = %self.context.session_id,
            index,
            correct = outcome.correct,
            "answer recorded"
        );
        self.state.outcomes.push(outcome);
        self.quiz_options = None;

        self.state.phase = if index + 1 < self.state.queue.len() {
            SessionPhase::Active { index: index + 1 }
        } else {
            tracing::debug!(session_id = %self.context.session_id, "practice session complete");
            SessionPhase::Complete
        };

        Ok(self.state.phase)
    }

    pub fn progress(&self) -> Progress {
        let total = self.state.queue.len();
        Progress {
            position: (self.state.index() + 1).min(total),
            total,
            correct: self.state.correct_count(),
        }
    }

    /// Summarize a completed session.
    pub fn finish(&self, ended_at: DateTime<Utc>) -> Result<TestResult> {
        crate::results::summarize(&self.context, &self.state, ended_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Translation;
    use pretty_assertions::assert_eq;

    fn word(id: &str, value: &str, translations: &[&str]) -> Word {
        Word {
            id: id.to_string(),
            value: value.to_string(),
            translations: translations
                .iter()
                .enumerate()
                .map(|(i, t)| Translation::new(format!("{id}-t{i}"), *t))
                .collect(),
            category: "animals".to_string(),
            complexity: 1,
        }
    }

    fn controller(mode: PracticeMode, words: Vec<Word>) -> SessionController {
        SessionController::new(PracticeContext::new("s1", "list-1"), mode, words, Utc::now())
            .with_distractors(DistractorGenerator::with_seed(9))
    }

    fn three_words() -> Vec<Word> {
        vec![
            word("w1", "cat", &["chat"]),
            word("w2", "dog", &["chien"]),
            word("w3", "house", &["maison", "foyer"]),
        ]
    }

    #[test]
    fn index_advances_once_per_answer() {
        let mut session = controller(PracticeMode::Flashcards, three_words());
        assert_eq!(session.state().phase(), SessionPhase::Active { index: 0 });

        for expected in 1..3 {
            let phase = session.submit_answer(true).unwrap();
            assert_eq!(phase, SessionPhase::Active { index: expected });
            assert_eq!(session.state().outcomes().len(), expected);
        }

        assert_eq!(session.submit_answer(false).unwrap(), SessionPhase::Complete);
        assert_eq!(session.state().outcomes().len(), 3);
        assert!(session.is_complete());
    }

    #[test]
    fn submit_after_complete_fails_without_mutation() {
        let mut session = controller(PracticeMode::Flashcards, vec![word("w1", "cat", &["chat"])]);
        session.submit_answer(true).unwrap();

        let err = session.submit_answer(false).unwrap_err();
        assert_eq!(err, SessionError::AlreadyComplete { answered: 1 });
        assert_eq!(session.state().outcomes(), &[AnswerOutcome::flashcard(true)]);
        assert!(session.is_complete());
    }

    #[test]
    fn empty_queue_starts_complete() {
        let mut session = controller(PracticeMode::Writing, vec![]);
        assert!(session.is_complete());
        assert!(session.current_prompt().is_none());
        assert!(session.evaluate("anything").is_none());
        assert_eq!(
            session.progress(),
            Progress { position: 0, total: 0, correct: 0 }
        );
    }

    #[test]
    fn complete_session_has_no_prompt() {
        let mut session = controller(PracticeMode::Quiz, vec![word("w1", "cat", &["chat"])]);
        session.submit_answer(true).unwrap();
        assert!(session.current_prompt().is_none());
        assert!(session.current_word().is_none());
    }

    #[test]
    fn outcome_from_another_mode_is_rejected() {
        let mut session = controller(PracticeMode::Writing, three_words());
        let quiz = AnswerOutcome::quiz(&three_words()[0], "chat");

        assert_eq!(
            session.submit_answer(quiz).unwrap_err(),
            SessionError::ModeMismatch {
                expected: PracticeMode::Writing,
                actual: PracticeMode::Quiz,
            }
        );
        assert!(session.state().outcomes().is_empty());
        assert_eq!(session.state().phase(), SessionPhase::Active { index: 0 });
    }

    #[test]
    fn self_report_takes_session_mode() {
        let mut session = controller(PracticeMode::Quiz, three_words());
        session.submit_answer(false).unwrap();

        let recorded = &session.state().outcomes()[0];
        assert_eq!(recorded.mode, PracticeMode::Quiz);
        assert!(!recorded.correct);
        assert_eq!(recorded.score, None);
    }

    #[test]
    fn quiz_options_are_stable_until_advance() {
        let mut session = controller(PracticeMode::Quiz, three_words());

        let first: Vec<String> = session.current_prompt().unwrap().options.unwrap().to_vec();
        assert_eq!(first.len(), 4);
        assert_eq!(first.iter().filter(|o| *o == "chat").count(), 1);

        for _ in 0..5 {
            let again = session.current_prompt().unwrap();
            assert_eq!(again.options.unwrap(), first.as_slice());
        }

        let outcome = session.evaluate("chat").unwrap();
        assert!(outcome.correct);
        session.submit_answer(outcome).unwrap();

        let next = session.current_prompt().unwrap();
        assert_eq!(next.word.id, "w2");
        let options = next.options.unwrap();
        assert!(options.iter().any(|o| o == "chien"));
        assert!(!options.iter().any(|o| o == "chat"));
    }

    #[test]
    fn non_quiz_prompt_has_no_options() {
        let mut session = controller(PracticeMode::Writing, three_words());
        let prompt = session.current_prompt().unwrap();
        assert!(prompt.options.is_none());
        assert!(prompt.speech.is_none());
        assert_eq!(prompt.total, 3);
    }

    #[test]
    fn listening_prompt_carries_speech_cue() {
        let mut tagged = word("w1", "cat", &["chat"]);
        tagged.translations[0].language = Some("fr-FR".to_string());
        let mut session = controller(PracticeMode::Listening, vec![tagged, word("w2", "dog", &["chien"])]);

        let cue = session.current_prompt().unwrap().speech.unwrap();
        assert_eq!(cue, SpeechCue { text: "cat".to_string(), language: "fr-FR".to_string() });

        session.submit_answer(true).unwrap();
        let cue = session.current_prompt().unwrap().speech.unwrap();
        assert_eq!(cue.language, DEFAULT_SPEECH_LANGUAGE);
    }

    #[test]
    fn quiz_only_accepts_first_translation() {
        let house = word("w3", "house", &["maison", "foyer"]);
        assert!(AnswerOutcome::quiz(&house, "maison").correct);
        assert!(!AnswerOutcome::quiz(&house, "foyer").correct);
        assert!(!AnswerOutcome::quiz(&house, "Maison").correct);
        assert_eq!(AnswerOutcome::quiz(&house, "foyer").match_score(), 0);
    }

    #[test]
    fn writing_accepts_any_translation_fuzzily() {
        let house = word("w3", "house", &["maison", "foyer"]);
        let outcome = AnswerOutcome::writing(&house, " Foyer ");
        assert!(outcome.correct);
        assert_eq!(outcome.score, Some(100));
        assert_eq!(outcome.submitted_text(), " Foyer ");

        let outcome = AnswerOutcome::writing(&house, "masion");
        assert!(!outcome.correct);
        assert_eq!(outcome.score, Some(67));
    }

    #[test]
    fn flashcards_need_self_report() {
        let session = controller(PracticeMode::Flashcards, three_words());
        assert!(session.evaluate("chat").is_none());
        assert_eq!(AnswerOutcome::from(false).submitted_text(), "");
    }

    #[test]
    fn progress_tracks_position_and_correct() {
        let mut session = controller(PracticeMode::Writing, three_words());
        assert_eq!(session.progress(), Progress { position: 1, total: 3, correct: 0 });

        let outcome = session.evaluate("chat").unwrap();
        session.submit_answer(outcome).unwrap();
        let outcome = session.evaluate("loup").unwrap();
        session.submit_answer(outcome).unwrap();
        assert_eq!(session.progress(), Progress { position: 3, total: 3, correct: 1 });

        let outcome = session.evaluate("maison").unwrap();
        session.submit_answer(outcome).unwrap();
        assert_eq!(session.progress(), Progress { position: 3, total: 3, correct: 2 });
    }

    #[test]
    fn guest_context() {
        let context = PracticeContext::new("s1", "list-1");
        assert_eq!(context.user_id(), GUEST_USER_ID);
        assert_eq!(context.with_user("u-42").user_id(), "u-42");
    }
}
