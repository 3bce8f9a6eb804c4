//! Feedback records and the ingestion enrichment pipeline.
//!
//! A record's `sentiment` and `themes` are computed exactly once, when
//! the record is created, and never recomputed - later lexicon or
//! catalog changes do not retroactively reanalyze stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::sentiment::{SentimentAnalyzer, SentimentResult};
use crate::themes::{Theme, ThemeDetector};

/// A raw feedback submission, as received from the validation layer.
///
/// The engine assumes the caller has already validated fields (rating
/// bounds, text length, product catalog); it rejects nothing itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub product_id: String,
    pub rating: u8,
    pub review_text: String,
}

/// An enriched feedback record.
///
/// Immutable once analyzed; this is the shape the storage layer persists
/// and the aggregation/insight layers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub product_id: String,
    /// Star rating in [1, 5].
    pub rating: u8,
    pub review_text: String,
    /// `None` models a missing or unparseable timestamp; the aggregator
    /// treats it as maximally stale.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Set exactly once at creation.
    pub sentiment: SentimentResult,
    /// Non-empty; set exactly once at creation.
    pub themes: Vec<Theme>,
}

impl FeedbackRecord {
    /// Rating mapped to [-1.0, 1.0]: 1 star -> -1, 3 stars -> 0, 5 -> +1.
    pub fn rating_polarity(&self) -> f64 {
        (f64::from(self.rating) - 3.0) / 2.0
    }

    /// Whether the record carries the given theme.
    pub fn has_theme(&self, theme: Theme) -> bool {
        self.themes.contains(&theme)
    }
}

/// Runs sentiment analysis and theme detection once per submission.
#[derive(Clone, Default)]
pub struct IngestPipeline {
    analyzer: SentimentAnalyzer,
    detector: ThemeDetector,
}

impl IngestPipeline {
    /// Create a pipeline over the built-in lexicon and theme catalog.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentAnalyzer::new(),
            detector: ThemeDetector::new(),
        }
    }

    /// Create a pipeline with substitute components.
    pub fn with_components(analyzer: SentimentAnalyzer, detector: ThemeDetector) -> Self {
        Self { analyzer, detector }
    }

    /// Enrich a submission into a record stamped with the current time.
    pub fn ingest(&self, submission: NewFeedback) -> FeedbackRecord {
        self.ingest_at(submission, Utc::now())
    }

    /// Enrich a submission with an explicit creation timestamp.
    pub fn ingest_at(&self, submission: NewFeedback, created_at: DateTime<Utc>) -> FeedbackRecord {
        let sentiment = self.analyzer.analyze(&submission.review_text);
        let themes = self.detector.detect(&submission.review_text);

        debug!(
            product_id = %submission.product_id,
            rating = submission.rating,
            label = %sentiment.label,
            theme_count = themes.len(),
            "ingested feedback"
        );

        FeedbackRecord {
            id: Uuid::new_v4(),
            product_id: submission.product_id,
            rating: submission.rating,
            review_text: submission.review_text,
            created_at: Some(created_at),
            sentiment,
            themes,
        }
    }
}
