//! Answer scoring for writing and listening modes.

use crate::types::Translation;
use serde::{Deserialize, Serialize};

/// Minimum score for a typed answer to count as correct.
pub const MATCH_THRESHOLD: u8 = 85;

/// Best score of a typed answer across a word's translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether any translation reached the threshold.
    pub is_correct: bool,
    /// Highest score achieved, 0 to 100.
    pub score: u8,
}

/// Score a typed answer against one canonical translation, 0 to 100.
///
/// Both sides are trimmed and lowercased first. `None` counts as empty text.
pub fn score<'a>(typed: impl Into<Option<&'a str>>, canonical: impl Into<Option<&'a str>>) -> u8 {
    let typed = normalize(typed.into());
    let canonical = normalize(canonical.into());

    let max_len = typed.chars().count().max(canonical.chars().count()).max(1);
    let distance = levenshtein_distance(&typed, &canonical);
    let similarity = 100.0 * (1.0 - distance as f64 / max_len as f64);

    similarity.round().clamp(0.0, 100.0) as u8
}

/// Score a typed answer against every translation of a word.
///
/// Correct if any translation reaches [`MATCH_THRESHOLD`]; the reported score
/// is the maximum across translations.
pub fn best_match(typed: &str, translations: &[Translation]) -> MatchResult {
    let score = translations
        .iter()
        .map(|t| score(typed, t.value.as_str()))
        .max()
        .unwrap_or(0);

    MatchResult {
        is_correct: score >= MATCH_THRESHOLD,
        score,
    }
}

fn normalize(s: Option<&str>) -> String {
    s.unwrap_or_default().trim().to_lowercase()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
