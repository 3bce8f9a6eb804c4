//! Insight generation: an ordered rule catalogue over aggregates and records.

mod engine;
mod rules;
mod types;

pub use engine::{InsightConfig, InsightRuleEngine};
pub use rules::{QuickWinPattern, QUICK_WIN_PATTERNS};
pub use types::{Effort, Impact, Insight, InsightCategory, InsightInput, Priority};
