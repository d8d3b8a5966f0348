//! Core types for vocabulary practice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted translation of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: String,
    pub value: String,
    /// Language tag used for speech, e.g. `fr-FR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Translation {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            language: None,
        }
    }
}

fn default_complexity() -> u32 {
    1
}

/// Word as stored in a word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub value: String,
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub category: String,
    /// Complexity rank, 1 for the simplest words.
    #[serde(default = "default_complexity")]
    pub complexity: u32,
}

impl Word {
    /// Canonical translation values in stored order.
    pub fn canonical_translations(&self) -> Vec<String> {
        self.translations.iter().map(|t| t.value.clone()).collect()
    }

    /// The translation quiz mode and speech cues are built from.
    pub fn primary_translation(&self) -> Option<&Translation> {
        self.translations.first()
    }
}

/// Practice mode, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    Flashcards,
    Writing,
    Quiz,
    Listening,
}

impl Default for PracticeMode {
    fn default() -> Self {
        Self::Flashcards
    }
}

impl PracticeMode {
    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flashcards => "flashcards",
            Self::Writing => "writing",
            Self::Quiz => "quiz",
            Self::Listening => "listening",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "flashcards" => Some(Self::Flashcards),
            "writing" => Some(Self::Writing),
            "quiz" => Some(Self::Quiz),
            "listening" => Some(Self::Listening),
            _ => None,
        }
    }

    /// Whether answers are typed and scored with the fuzzy matcher.
    pub fn is_typed(&self) -> bool {
        matches!(self, Self::Writing | Self::Listening)
    }
}

/// Letter grade for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Band an accuracy percentage. Each band includes its lower bound.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 90.0 {
            Self::A
        } else if accuracy >= 80.0 {
            Self::B
        } else if accuracy >= 70.0 {
            Self::C
        } else if accuracy >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        }
    }
}

/// A word the user answered incorrectly during a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexWord {
    pub word_id: String,
    pub value: String,
    pub correct_translations: Vec<String>,
    /// Last submitted raw text, empty for flashcards.
    pub user_translation: String,
    /// Score of that submission, 0 when nothing was scored.
    pub match_score: u8,
    pub attempts: u32,
}

/// Finalized summary of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub word_list_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub correct_count: usize,
    pub total_count: usize,
    /// Session length in seconds.
    pub duration: f64,
    pub complex_words: Vec<ComplexWord>,
}

impl TestResult {
    /// Percentage of correct answers, 0 for an empty session.
    pub fn accuracy(&self) -> f64 {
        crate::results::accuracy(self.correct_count, self.total_count)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_accuracy(self.accuracy())
    }

    /// Duration rounded to whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.duration / 60.0).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grade_bands_include_lower_bound() {
        assert_eq!(Grade::from_accuracy(100.0), Grade::A);
        assert_eq!(Grade::from_accuracy(90.0), Grade::A);
        assert_eq!(Grade::from_accuracy(89.9), Grade::B);
        assert_eq!(Grade::from_accuracy(80.0), Grade::B);
        assert_eq!(Grade::from_accuracy(79.9), Grade::C);
        assert_eq!(Grade::from_accuracy(70.0), Grade::C);
        assert_eq!(Grade::from_accuracy(60.0), Grade::D);
        assert_eq!(Grade::from_accuracy(59.9), Grade::F);
        assert_eq!(Grade::from_accuracy(0.0), Grade::F);
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            PracticeMode::Flashcards,
            PracticeMode::Writing,
            PracticeMode::Quiz,
            PracticeMode::Listening,
        ] {
            assert_eq!(PracticeMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(PracticeMode::from_str("speed"), None);
    }

    #[test]
    fn word_defaults_when_deserializing() {
        let word: Word = serde_json::from_str(
            r#"{"id":"w1","value":"cat","translations":[{"id":"t1","value":"chat"}]}"#,
        )
        .unwrap();
        assert_eq!(word.complexity, 1);
        assert_eq!(word.category, "");
        assert_eq!(word.translations[0].language, None);
    }

    #[test]
    fn duration_minutes_rounds() {
        let result = TestResult {
            word_list_id: "list".to_string(),
            user_id: "guest".to_string(),
            date: Utc::now(),
            correct_count: 1,
            total_count: 2,
            duration: 95.0,
            complex_words: vec![],
        };
        assert_eq!(result.duration_minutes(), 2);
        assert_eq!(result.grade(), Grade::F);
    }
}
