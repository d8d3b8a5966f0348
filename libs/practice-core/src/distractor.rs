//! Plausible wrong answers for quiz mode.
//!
//! Each distractor is a small perturbation of the correct answer: two
//! neighbouring characters swapped, a vowel replaced, or the last character
//! dropped or padded. Candidates that collide with the answer or with an
//! earlier distractor are retried a bounded number of times before a
//! deterministic suffix fallback takes over.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of wrong options shown next to the correct answer.
pub const DISTRACTOR_COUNT: usize = 3;

/// Random perturbations tried per distractor before falling back.
pub const MAX_DISTRACTOR_ATTEMPTS: usize = 10;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Appended when vowel substitution finds no vowel.
const NO_VOWEL_SUFFIX: char = 's';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    AdjacentSwap,
    VowelSubstitution,
    TrailingEdit,
}

const STRATEGIES: [Strategy; 3] = [
    Strategy::AdjacentSwap,
    Strategy::VowelSubstitution,
    Strategy::TrailingEdit,
];

/// Generates quiz options from a correct answer.
#[derive(Debug, Clone)]
pub struct DistractorGenerator {
    rng: ChaCha8Rng,
}

impl Default for DistractorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DistractorGenerator {
    /// Generator seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, for reproducible option sets.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Exactly [`DISTRACTOR_COUNT`] strings, pairwise distinct and never equal
    /// to `correct`.
    pub fn generate(&mut self, correct: &str) -> Vec<String> {
        let mut accepted: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);

        for _ in 0..DISTRACTOR_COUNT {
            let candidate = match self.perturb_until_unique(correct, &accepted) {
                Some(candidate) => candidate,
                None => {
                    tracing::debug!(correct, "distractor attempts exhausted, using suffix fallback");
                    self.unique_suffix(correct, &accepted)
                }
            };
            accepted.push(candidate);
        }

        accepted
    }

    /// The correct answer plus its distractors in random order.
    pub fn options(&mut self, correct: &str) -> Vec<String> {
        let mut options = Vec::with_capacity(DISTRACTOR_COUNT + 1);
        options.push(correct.to_string());
        options.extend(self.generate(correct));
        options.shuffle(&mut self.rng);
        options
    }

    fn perturb_until_unique(&mut self, correct: &str, accepted: &[String]) -> Option<String> {
        let chars: Vec<char> = correct.chars().collect();

        for _ in 0..MAX_DISTRACTOR_ATTEMPTS {
            let strategy = STRATEGIES[self.rng.gen_range(0..STRATEGIES.len())];
            if let Some(candidate) = self.apply(strategy, &chars) {
                if is_fresh(&candidate, correct, accepted) {
                    return Some(candidate);
                }
            }
        }

        None
    }

    fn apply(&mut self, strategy: Strategy, chars: &[char]) -> Option<String> {
        match strategy {
            Strategy::AdjacentSwap => {
                if chars.len() < 2 {
                    return None;
                }
                let pos = self.rng.gen_range(0..chars.len() - 1);
                let mut swapped = chars.to_vec();
                swapped.swap(pos, pos + 1);
                Some(swapped.into_iter().collect())
            }
            Strategy::VowelSubstitution => {
                let Some(pos) = chars.iter().position(|c| is_vowel(*c)) else {
                    let mut padded: String = chars.iter().collect();
                    padded.push(NO_VOWEL_SUFFIX);
                    return Some(padded);
                };
                let current = chars[pos].to_ascii_lowercase();
                let others: Vec<char> = VOWELS.iter().copied().filter(|v| *v != current).collect();
                let mut replacement = *others.choose(&mut self.rng)?;
                if chars[pos].is_ascii_uppercase() {
                    replacement = replacement.to_ascii_uppercase();
                }
                let mut substituted = chars.to_vec();
                substituted[pos] = replacement;
                Some(substituted.into_iter().collect())
            }
            Strategy::TrailingEdit => {
                if chars.is_empty() {
                    return None;
                }
                if self.rng.gen_bool(0.5) {
                    Some(chars[..chars.len() - 1].iter().collect())
                } else {
                    let extra = chars[self.rng.gen_range(0..chars.len())];
                    let mut padded: String = chars.iter().collect();
                    padded.push(extra);
                    Some(padded)
                }
            }
        }
    }

    /// Append a letter that yields an unused candidate. There are more letters
    /// than distractors, so the scan always finds one.
    fn unique_suffix(&mut self, correct: &str, accepted: &[String]) -> String {
        let start = self.rng.gen_range(0..26u8);
        (0..26u8)
            .map(|i| format!("{correct}{}", char::from(b'a' + (start + i) % 26)))
            .find(|candidate| is_fresh(candidate, correct, accepted))
            .unwrap_or_else(|| format!("{correct}{}", "z".repeat(accepted.len() + 2)))
    }
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c.to_ascii_lowercase())
}

fn is_fresh(candidate: &str, correct: &str, accepted: &[String]) -> bool {
    !candidate.is_empty() && candidate != correct && !accepted.iter().any(|a| a == candidate)
}
