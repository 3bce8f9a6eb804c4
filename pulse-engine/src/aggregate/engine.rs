//! Confidence- and time-weighted aggregation over feedback records.
//!
//! Every record contributes a weight built from three factors:
//! exponential time decay (half-life), a floored sentiment confidence,
//! and a dedupe factor that shrinks repeated submissions of the same
//! normalized text. Rating-derived polarity (not the text score) drives
//! the sentiment split; theme weight is split evenly across a record's
//! theme labels so multi-theme records don't inflate totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::config::AggregationConfig;
use super::phrases::{mine_top_phrases, PhraseCount, TOP_PHRASE_COUNT};
use crate::record::FeedbackRecord;
use crate::text::fingerprint;
use crate::themes::Theme;

/// Age assigned to records with a missing timestamp: maximally stale.
const MAX_STALE_AGE_DAYS: f64 = 9999.0;

/// Guard against division by zero when normalizing percentages.
const EPSILON: f64 = 1e-9;

/// Rating polarity below which a record counts as a negative mention.
const NEGATIVE_POLARITY_CUTOFF: f64 = -0.1;

/// Effective sample size below which aggregates are flagged.
const MIN_EFFECTIVE_TOTAL: f64 = 5.0;

// ============================================================================
// Snapshot Types
// ============================================================================

/// Per-theme aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeStat {
    pub theme: Theme,
    /// Sum of fractional review weights attributed to this theme.
    pub effective_count: f64,
    /// Weighted mean sentiment confidence of the contributing records.
    pub confidence: f64,
    /// Share of this theme's weight coming from negatively rated records.
    pub negative_share: f64,
    /// Most frequent phrases among negative mentions of this theme.
    pub top_phrases: Vec<PhraseCount>,
}

/// Dashboard-ready aggregate over a record collection.
///
/// Ephemeral: recomputed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub generated_at: DateTime<Utc>,
    /// Raw number of records aggregated.
    pub record_count: usize,
    /// Effective sample size after decay, floors, and dedupe.
    pub effective_total: f64,
    /// Weighted sentiment split, each on a 0-100 scale.
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    /// True when the effective sample size is too small to trust.
    pub insufficient_data: bool,
    /// Per-theme statistics, in stable theme order.
    pub themes: Vec<ThemeStat>,
}

impl AggregateSnapshot {
    /// Look up the statistics for one theme, if any record carried it.
    pub fn theme(&self, theme: Theme) -> Option<&ThemeStat> {
        self.themes.iter().find(|stat| stat.theme == theme)
    }
}

// ============================================================================
// Weight Derivation
// ============================================================================

/// The per-record weight and its factors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReviewWeight {
    pub(crate) time_weight: f64,
    pub(crate) confidence_floor: f64,
    pub(crate) dedupe_factor: f64,
}

impl ReviewWeight {
    /// The combined weight this record contributes.
    pub(crate) fn value(&self) -> f64 {
        self.confidence_floor * self.time_weight * self.dedupe_factor
    }
}

fn age_days(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match created_at {
        // Future-dated records clamp to age zero, keeping weights <= 1.
        Some(at) => ((now - at).num_seconds() as f64 / 86_400.0).max(0.0),
        None => MAX_STALE_AGE_DAYS,
    }
}

// ============================================================================
// Aggregation Engine
// ============================================================================

/// Aggregation engine over an injected configuration.
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    config: AggregationConfig,
}

struct ThemeAccum<'a> {
    weight: f64,
    weighted_confidence: f64,
    negative_weight: f64,
    negative_texts: Vec<&'a str>,
}

impl AggregationEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Aggregate a record collection as of the current time.
    pub fn aggregate(&self, records: &[FeedbackRecord]) -> AggregateSnapshot {
        self.aggregate_at(records, Utc::now())
    }

    /// Aggregate a record collection as of an explicit reference time.
    ///
    /// Pure: the same records, config, and `now` always produce the same
    /// snapshot.
    pub fn aggregate_at(&self, records: &[FeedbackRecord], now: DateTime<Utc>) -> AggregateSnapshot {
        let mut positive = 0.0;
        let mut negative = 0.0;
        let mut neutral = 0.0;
        let mut effective_total = 0.0;

        let mut seen_fingerprints: HashMap<String, usize> = HashMap::new();
        let mut theme_accums: HashMap<Theme, ThemeAccum<'_>> = HashMap::new();

        for record in records {
            let weight = self.derive_weight(record, now, &mut seen_fingerprints);
            let w = weight.value();

            let polarity = record.rating_polarity();
            positive += polarity.max(0.0) * w;
            negative += (-polarity).max(0.0) * w;
            neutral += (1.0 - polarity.abs()) * w * self.config.neutral_factor;
            effective_total += w;

            // Fractional attribution: the weight is split evenly across
            // the record's themes so the per-theme counts sum to w.
            let share = w / record.themes.len() as f64;
            let is_negative_mention = polarity < NEGATIVE_POLARITY_CUTOFF;

            for &theme in &record.themes {
                let accum = theme_accums.entry(theme).or_insert_with(|| ThemeAccum {
                    weight: 0.0,
                    weighted_confidence: 0.0,
                    negative_weight: 0.0,
                    negative_texts: Vec::new(),
                });

                accum.weight += share;
                accum.weighted_confidence += record.sentiment.confidence * share;

                if is_negative_mention {
                    accum.negative_weight += share;
                    if accum.negative_texts.len() < self.config.phrase_limit {
                        accum.negative_texts.push(record.review_text.as_str());
                    }
                }
            }
        }

        let denominator = positive + negative + neutral + EPSILON;

        let mut themes: Vec<ThemeStat> = theme_accums
            .into_iter()
            .map(|(theme, accum)| ThemeStat {
                theme,
                effective_count: accum.weight,
                confidence: accum.weighted_confidence / accum.weight.max(EPSILON),
                negative_share: accum.negative_weight / accum.weight.max(EPSILON),
                top_phrases: mine_top_phrases(&accum.negative_texts, TOP_PHRASE_COUNT),
            })
            .collect();
        themes.sort_by_key(|stat| stat.theme);

        let snapshot = AggregateSnapshot {
            generated_at: now,
            record_count: records.len(),
            effective_total,
            positive_pct: positive / denominator * 100.0,
            negative_pct: negative / denominator * 100.0,
            neutral_pct: neutral / denominator * 100.0,
            insufficient_data: effective_total < MIN_EFFECTIVE_TOTAL,
            themes,
        };

        debug!(
            records = snapshot.record_count,
            effective_total = snapshot.effective_total,
            positive_pct = snapshot.positive_pct,
            negative_pct = snapshot.negative_pct,
            "aggregated feedback"
        );

        snapshot
    }

    /// Derive the weight of one record, updating the dedupe tally.
    fn derive_weight(
        &self,
        record: &FeedbackRecord,
        now: DateTime<Utc>,
        seen_fingerprints: &mut HashMap<String, usize>,
    ) -> ReviewWeight {
        let age = age_days(record.created_at, now);
        let time_weight = (-std::f64::consts::LN_2 * age / self.config.half_life_days).exp();

        let confidence_floor = record.sentiment.confidence.max(self.config.min_confidence);

        // k-th holder (0-indexed) of a fingerprint gets 1/sqrt(k+1).
        let occurrence = seen_fingerprints
            .entry(fingerprint(&record.review_text))
            .or_insert(0);
        let dedupe_factor = 1.0 / ((*occurrence + 1) as f64).sqrt();
        *occurrence += 1;

        ReviewWeight {
            time_weight,
            confidence_floor,
            dedupe_factor,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
