//! Lexicon-based sentiment analyzer with negation handling.
//!
//! Scans tokens left to right, accumulating tier weights for lexicon
//! matches and inverting the sign of any match that falls inside a
//! negation scope (the three tokens following a trigger like "not").
//! The raw total is normalized against a fixed ceiling and mapped to a
//! label. The analyzer never fails: empty, unmatched, or malformed input
//! degrades to a neutral, zero-confidence result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lexicon::Lexicon;
use crate::text::tokenize;

/// Fixed normalization ceiling for the raw weight total.
///
/// A heuristic (roughly ten strong-polarity words), not derived from the
/// text under analysis.
pub const MAX_WEIGHT: f64 = 20.0;

/// Number of tokens after a trigger that fall inside its negation scope.
pub const NEGATION_SCOPE: usize = 3;

/// Score above which a review is labeled Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.2;

/// Score below which a review is labeled Negative.
///
/// Intentionally asymmetric with the positive threshold: the neutral
/// band is wide on the positive side and narrow on the negative side.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Words that open a negation scope. "n't"-suffixed contractions
/// (don't, can't, wasn't, ...) are matched by suffix.
const NEGATION_TRIGGERS: &[&str] = &["not", "never", "no", "cannot"];

fn is_negation_trigger(token: &str) -> bool {
    NEGATION_TRIGGERS.contains(&token) || token.ends_with("n't")
}

// ============================================================================
// Result Types
// ============================================================================

/// Polarity label derived from the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Derive the label from a normalized score. This is the only place
    /// labels are assigned; a label is never set independently of its
    /// score.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Result of analyzing one review text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Polarity label, a deterministic function of `score`.
    pub label: SentimentLabel,
    /// Normalized score in [-1.0, 1.0].
    pub score: f64,
    /// Confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Lexicon words that contributed to the score, in text order.
    pub matched_words: Vec<String>,
}

impl SentimentResult {
    /// The neutral zero-confidence result used for empty or unmatched
    /// input.
    fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.0,
            confidence: 0.0,
            matched_words: Vec::new(),
        }
    }
}

/// One lexicon match in a debug trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMatch {
    /// The lexicon word that matched.
    pub word: String,
    /// Token position in the tokenized text.
    pub position: usize,
    /// Tier weight before negation adjustment.
    pub base_weight: i32,
    /// Weight actually accumulated (sign-inverted when negated).
    pub applied_weight: i32,
    /// Whether the token sat inside a negation scope.
    pub negated: bool,
}

/// Full scoring trace for explainability tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentTrace {
    /// Tokens after preprocessing.
    pub tokens: Vec<String>,
    /// Every lexicon match with its adjustment.
    pub matches: Vec<TokenMatch>,
    /// Positions of negation triggers.
    pub negation_positions: Vec<usize>,
    /// Sum of applied weights before normalization.
    pub raw_total: i32,
    /// The result the plain analysis would return.
    pub result: SentimentResult,
}

// ============================================================================
// Analyzer
// ============================================================================

/// Sentiment analyzer over an injected lexicon.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
}

impl SentimentAnalyzer {
    /// Create an analyzer over the built-in lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::default(),
        }
    }

    /// Create an analyzer over a substitute lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Analyze one review text.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let (matches, _negations, raw_total) = self.score_tokens(&tokens);
        self.build_result(&tokens, &matches, raw_total)
    }

    /// Analyze one review text and keep the full scoring trace.
    pub fn explain(&self, text: &str) -> SentimentTrace {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentTrace {
                tokens,
                matches: Vec::new(),
                negation_positions: Vec::new(),
                raw_total: 0,
                result: SentimentResult::neutral(),
            };
        }

        let (matches, negation_positions, raw_total) = self.score_tokens(&tokens);
        let result = self.build_result(&tokens, &matches, raw_total);

        SentimentTrace {
            tokens,
            matches,
            negation_positions,
            raw_total,
            result,
        }
    }

    /// Core scan: find negation triggers, then match and weight tokens.
    fn score_tokens(&self, tokens: &[String]) -> (Vec<TokenMatch>, Vec<usize>, i32) {
        let negation_positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| is_negation_trigger(token))
            .map(|(i, _)| i)
            .collect();

        // A token at position i is negated when some trigger at p covers
        // it: p < i <= p + NEGATION_SCOPE. Scopes from separate triggers
        // are independent and may overlap.
        let in_scope = |i: usize| {
            negation_positions
                .iter()
                .any(|&p| i > p && i <= p + NEGATION_SCOPE)
        };

        let mut matches = Vec::new();
        let mut raw_total = 0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(base_weight) = self.lexicon.weight_of(token) else {
                continue;
            };

            let negated = in_scope(i);
            let applied_weight = if negated { -base_weight } else { base_weight };
            raw_total += applied_weight;

            matches.push(TokenMatch {
                word: token.clone(),
                position: i,
                base_weight,
                applied_weight,
                negated,
            });
        }

        (matches, negation_positions, raw_total)
    }

    fn build_result(
        &self,
        tokens: &[String],
        matches: &[TokenMatch],
        raw_total: i32,
    ) -> SentimentResult {
        let score = (raw_total as f64 / MAX_WEIGHT).clamp(-1.0, 1.0);
        let label = SentimentLabel::from_score(score);

        let match_count = matches.len() as f64;
        let token_count = tokens.len() as f64;
        let confidence = (score.abs() + match_count / (token_count / 10.0).max(1.0)).min(1.0);

        debug!(
            raw_total,
            score,
            matches = matches.len(),
            tokens = tokens.len(),
            %label,
            "scored review"
        );

        SentimentResult {
            label,
            score,
            confidence,
            matched_words: matches.iter().map(|m| m.word.clone()).collect(),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SentimentAnalyzer {
        SentimentAnalyzer::new()
    }

    #[test]
    fn test_positive_sentiment() {
        let result = analyzer().analyze("Love this ring! It's excellent and perfect.");
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.score > 0.2);
        assert!(result.confidence > 0.0);
        assert_eq!(result.matched_words, vec!["love", "excellent", "perfect"]);
    }

    #[test]
    fn test_negative_sentiment() {
        let result = analyzer().analyze("Terrible product. It broke after one day. Worst purchase ever.");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(result.score < -0.1);
    }

    #[test]
    fn test_empty_text() {
        for text in ["", "   ", "\t\n", "!!! ???"] {
            let result = analyzer().analyze(text);
            assert_eq!(result.label, SentimentLabel::Neutral);
            assert_eq!(result.score, 0.0);
            assert_eq!(result.confidence, 0.0);
            assert!(result.matched_words.is_empty());
        }
    }

    #[test]
    fn test_no_lexicon_words() {
        let result = analyzer().analyze("the ring arrived on a tuesday");
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_negation_inverts_single_match() {
        // "comfortable" is +1; negated it must contribute -1.
        let trace = analyzer().explain("it is not comfortable");
        assert_eq!(trace.raw_total, -1);
        assert_eq!(trace.matches.len(), 1);
        assert!(trace.matches[0].negated);
        assert_eq!(trace.matches[0].applied_weight, -1);
    }

    #[test]
    fn test_negation_scope_is_exactly_three_tokens() {
        // "comfortable" at offset 3 from "not": negated.
        let inside = analyzer().explain("not very very comfortable");
        assert_eq!(inside.matches[0].position, 3);
        assert!(inside.matches[0].negated);

        // "comfortable" at offset 4 from "not": outside the scope.
        let outside = analyzer().explain("not very very very comfortable");
        assert_eq!(outside.matches[0].position, 4);
        assert!(!outside.matches[0].negated);
        assert_eq!(outside.raw_total, 1);
    }

    #[test]
    fn test_contraction_trigger() {
        let trace = analyzer().explain("I don't love it");
        assert_eq!(trace.negation_positions, vec![1]);
        assert_eq!(trace.raw_total, -2);
    }

    #[test]
    fn test_overlapping_scopes_stay_independent() {
        // Both triggers cover "good"; inversion applies once per match.
        let trace = analyzer().explain("not never good");
        assert_eq!(trace.negation_positions, vec![0, 1]);
        assert_eq!(trace.raw_total, -1);
    }

    #[test]
    fn test_score_clamped_for_long_strong_input() {
        let text = "love ".repeat(500);
        let result = analyzer().analyze(&text);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_label_thresholds_are_asymmetric() {
        assert_eq!(SentimentLabel::from_score(0.2), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.21), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(-0.1), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(-0.11), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_confidence_formula() {
        // "love it": 1 match, 2 tokens.
        // score = 2/20 = 0.1; confidence = min(1, 0.1 + 1/max(1, 0.2)) = 1.0
        let result = analyzer().analyze("love it");
        assert!(result.score > 0.0);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_substitute_lexicon_is_used() {
        let lexicon = Lexicon::from_tiers(&["zonk"], &[], &[], &[]);
        let analyzer = SentimentAnalyzer::with_lexicon(lexicon);
        let result = analyzer.analyze("zonk zonk zonk");
        assert_eq!(result.label, SentimentLabel::Positive);
        // Built-in words mean nothing to this analyzer.
        assert_eq!(analyzer.analyze("love love love").score, 0.0);
    }

    #[test]
    fn test_explain_matches_analyze() {
        let text = "The clasp broke but the design is beautiful";
        let plain = analyzer().analyze(text);
        let trace = analyzer().explain(text);
        assert_eq!(plain.score, trace.result.score);
        assert_eq!(plain.label, trace.result.label);
        assert_eq!(plain.matched_words, trace.result.matched_words);
    }
}
