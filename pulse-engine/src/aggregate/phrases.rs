//! Frequent-phrase mining over negative review texts.
//!
//! Extracts contiguous 2- and 3-word sequences after stop-word removal
//! and reports the most frequent ones. Everything is deterministic:
//! ties are broken lexicographically.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::text::tokenize;

/// Number of phrases reported per theme.
pub const TOP_PHRASE_COUNT: usize = 4;

/// Filler words dropped before sequence extraction. "too" and "not" are
/// deliberately kept: they carry complaint meaning ("too heavy").
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has",
        "have", "i", "if", "in", "is", "it", "it's", "its", "my", "of", "on", "or", "so", "that",
        "the", "them", "they", "this", "to", "was", "we", "were", "will", "with", "you",
    ]
    .into_iter()
    .collect()
});

/// A mined phrase with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseCount {
    pub phrase: String,
    pub count: usize,
}

/// Mine the top frequent 2- and 3-word sequences across the given texts.
pub fn mine_top_phrases(texts: &[&str], limit: usize) -> Vec<PhraseCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for text in texts {
        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| !STOP_WORDS.contains(t.as_str()))
            .collect();

        for window_size in [2, 3] {
            for window in tokens.windows(window_size) {
                let phrase = window.join(" ");
                *counts.entry(phrase).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<PhraseCount> = counts
        .into_iter()
        .map(|(phrase, count)| PhraseCount { phrase, count })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.phrase.cmp(&b.phrase)));
    ranked.truncate(limit);
    ranked
}
