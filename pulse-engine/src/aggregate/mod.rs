//! Aggregation: weighted compression of records into dashboard statistics.

mod config;
mod engine;
mod phrases;

pub use config::AggregationConfig;
pub use engine::{AggregateSnapshot, AggregationEngine, ThemeStat};
pub use phrases::{mine_top_phrases, PhraseCount, TOP_PHRASE_COUNT};
