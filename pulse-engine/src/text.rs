//! Text preprocessing shared across the engine.
//!
//! Tokenization here is deliberately simple: lowercase, replace
//! punctuation with spaces, split on whitespace. Word characters
//! (Unicode letters, digits, underscores) survive, so non-ASCII words
//! tokenize intact. Apostrophes interior to a word are kept so
//! contractions like "don't" stay one token and can act as negation
//! triggers; surrounding quote marks are stripped.

/// Lowercase and tokenize review text.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize text to a duplicate-detection fingerprint.
///
/// Lowercases, strips punctuation entirely (apostrophes included), and
/// collapses runs of whitespace, so trivially reworded resubmissions of
/// the same review collide.
pub fn fingerprint(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
