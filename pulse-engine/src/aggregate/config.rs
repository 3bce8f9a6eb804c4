//! Aggregation configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Half-life of the exponential time decay, in days. A record this
    /// old contributes half the weight of a fresh one.
    pub half_life_days: f64,
    /// Floor applied to per-record sentiment confidence, so even
    /// zero-confidence records contribute something.
    pub min_confidence: f64,
    /// Scale factor for the neutral contribution of mid-polarity records.
    pub neutral_factor: f64,
    /// Maximum number of negative review texts mined for phrases per
    /// theme.
    pub phrase_limit: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            half_life_days: 30.0,
            min_confidence: 0.2,
            neutral_factor: 0.5,
            phrase_limit: 200,
        }
    }
}
