//! Pulse Engine - Feedback analytics for product operations teams.
//!
//! Turns short free-text product reviews into structured signal: a
//! polarity judgment, topical labels, dashboard-ready aggregates, and a
//! prioritized list of actionable findings. Everything is rule- and
//! lexicon-based - explainable, reproducible (same input, same output),
//! and robust to noisy informal text.
//!
//! # Architecture
//!
//! ```text
//! raw text ──► Sentiment Analyzer ──┐
//!          ──► Theme Detector ──────┼──► FeedbackRecord (enriched once)
//!                                   │
//!            stored record set ─────┴──► Aggregation Engine ──► AggregateSnapshot
//!                                   │                                │
//!                                   └──────────► Insight Rule Engine ┴──► [Insight]
//! ```
//!
//! The engine has no knowledge of HTTP, storage, or UI state: it
//! consumes and produces plain data records, performs no I/O, and every
//! entry point is a pure synchronous function. Malformed or empty text
//! never errors - it degrades to a neutral, zero-confidence result.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod aggregate;
pub mod insight;
pub mod record;
pub mod sentiment;
pub mod text;
pub mod themes;

pub use aggregate::{AggregateSnapshot, AggregationConfig, AggregationEngine, ThemeStat};
pub use insight::{Insight, InsightConfig, InsightInput, InsightRuleEngine, Priority};
pub use record::{FeedbackRecord, IngestPipeline, NewFeedback};
pub use sentiment::{Lexicon, SentimentAnalyzer, SentimentLabel, SentimentResult};
pub use themes::{Theme, ThemeCatalog, ThemeDetector};
