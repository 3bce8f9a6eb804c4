//! Weighted sentiment lexicon.
//!
//! Words are organized in four fixed tiers: strong/moderate positive and
//! moderate/strong negative. The lexicon is immutable configuration - it
//! is built once and injected into the analyzer, never mutated, so tests
//! can substitute a tiny lexicon without touching process state.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Weight assigned to strong positive words.
pub const STRONG_POSITIVE_WEIGHT: i32 = 2;
/// Weight assigned to moderate positive words.
pub const MODERATE_POSITIVE_WEIGHT: i32 = 1;
/// Weight assigned to moderate negative words.
pub const MODERATE_NEGATIVE_WEIGHT: i32 = -1;
/// Weight assigned to strong negative words.
pub const STRONG_NEGATIVE_WEIGHT: i32 = -2;

const STRONG_POSITIVE: &[&str] = &[
    "love",
    "excellent",
    "perfect",
    "amazing",
    "stunning",
    "gorgeous",
    "outstanding",
    "brilliant",
    "fantastic",
    "wonderful",
    "marvelous",
    "superb",
];

const MODERATE_POSITIVE: &[&str] = &[
    "shiny",
    "elegant",
    "comfortable",
    "premium",
    "beautiful",
    "great",
    "good",
    "nice",
    "fine",
    "pretty",
    "lovely",
    "satisfied",
    "pleased",
    "happy",
    "satisfactory",
    "decent",
];

const MODERATE_NEGATIVE: &[&str] = &[
    "tarnish",
    "dull",
    "uncomfortable",
    "heavy",
    "cheap",
    "poor",
    "disappointed",
    "fragile",
    "ugly",
    "bad",
    "unhappy",
    "unsatisfied",
    "mediocre",
    "average",
    "okay",
    "ok",
];

const STRONG_NEGATIVE: &[&str] = &[
    "broke",
    "broken",
    "terrible",
    "awful",
    "worst",
    "horrible",
    "disgusting",
    "hate",
    "useless",
    "waste",
    "defective",
    "damaged",
];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_tiers(
        STRONG_POSITIVE,
        MODERATE_POSITIVE,
        MODERATE_NEGATIVE,
        STRONG_NEGATIVE,
    )
});

/// Static mapping of words to integer polarity weights.
#[derive(Debug, Clone)]
pub struct Lexicon {
    weights: HashMap<String, i32>,
}

impl Lexicon {
    /// Build a lexicon from four tier word lists.
    ///
    /// A word listed in more than one tier keeps the weight of the last
    /// tier that mentions it.
    pub fn from_tiers(
        strong_positive: &[&str],
        moderate_positive: &[&str],
        moderate_negative: &[&str],
        strong_negative: &[&str],
    ) -> Self {
        let mut weights = HashMap::new();

        let tiers: [(&[&str], i32); 4] = [
            (strong_positive, STRONG_POSITIVE_WEIGHT),
            (moderate_positive, MODERATE_POSITIVE_WEIGHT),
            (moderate_negative, MODERATE_NEGATIVE_WEIGHT),
            (strong_negative, STRONG_NEGATIVE_WEIGHT),
        ];

        for (words, weight) in tiers {
            for word in words {
                weights.insert(word.to_lowercase(), weight);
            }
        }

        Self { weights }
    }

    /// The built-in production lexicon, materialized once per process.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    /// Exact whole-token lookup. Tokens are already lowercased single
    /// words, so a hash lookup is a word-boundary match.
    pub fn weight_of(&self, token: &str) -> Option<i32> {
        self.weights.get(token).copied()
    }

    /// Number of distinct words across all tiers.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when the lexicon holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
