//! Sentiment analysis: weighted lexicon scoring with negation scopes.

mod analyzer;
mod lexicon;

pub use analyzer::{
    SentimentAnalyzer, SentimentLabel, SentimentResult, SentimentTrace, TokenMatch, MAX_WEIGHT,
    NEGATION_SCOPE, NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};
pub use lexicon::{
    Lexicon, MODERATE_NEGATIVE_WEIGHT, MODERATE_POSITIVE_WEIGHT, STRONG_NEGATIVE_WEIGHT,
    STRONG_POSITIVE_WEIGHT,
};
