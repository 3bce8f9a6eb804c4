//! End-to-end flow tests: ingestion -> aggregation -> insights.
//!
//! Exercises the full pipeline over realistic review sets, including the
//! canonical mixed batch: six five-star positive reviews and four
//! one-star durability complaints.

use chrono::{DateTime, Duration, Utc};

use pulse_engine::insight::InsightCategory;
use pulse_engine::{
    AggregationEngine, FeedbackRecord, IngestPipeline, InsightInput, InsightRuleEngine,
    NewFeedback, Priority, SentimentLabel, Theme,
};

fn reference_now() -> DateTime<Utc> {
    "2026-08-01T12:00:00Z".parse().expect("valid timestamp")
}

fn ingest(
    pipeline: &IngestPipeline,
    product_id: &str,
    rating: u8,
    text: &str,
    age_days: i64,
    now: DateTime<Utc>,
) -> FeedbackRecord {
    pipeline.ingest_at(
        NewFeedback {
            product_id: product_id.to_string(),
            rating,
            review_text: text.to_string(),
        },
        now - Duration::days(age_days),
    )
}

/// Six positive five-star reviews and four one-star durability
/// complaints mentioning "broke" and "tarnish".
fn mixed_batch(now: DateTime<Utc>) -> Vec<FeedbackRecord> {
    let pipeline = IngestPipeline::new();

    let positives = [
        "Love this ring! Absolutely stunning and elegant.",
        "Excellent craftsmanship, gorgeous on the hand.",
        "Perfect gift, my wife was so pleased with it.",
        "Amazing shine, looks fantastic in person.",
        "Wonderful piece, elegant and very pretty.",
        "Outstanding! Love the sparkle, brilliant buy.",
    ];
    let negatives = [
        "It broke after a week and started to tarnish. Terrible.",
        "The band broke in days and the finish began to tarnish. Awful.",
        "Broke almost immediately, then the tarnish set in. Horrible.",
        "Clasp broke on day two and the metal has visible tarnish. Hate it.",
    ];

    let mut records = Vec::new();
    for (i, text) in positives.iter().enumerate() {
        records.push(ingest(&pipeline, "Rings", 5, text, i as i64, now));
    }
    for (i, text) in negatives.iter().enumerate() {
        records.push(ingest(&pipeline, "Rings", 1, text, i as i64, now));
    }
    records
}

#[test]
fn mixed_batch_aggregates_positive_over_negative() {
    let now = reference_now();
    let records = mixed_batch(now);

    let snapshot = AggregationEngine::new().aggregate_at(&records, now);

    assert_eq!(snapshot.record_count, 10);
    assert!(snapshot.positive_pct > snapshot.negative_pct);
    assert!(!snapshot.insufficient_data);

    // All four complaints are Durability-tagged, so the theme stat must
    // exist and carry mined complaint phrases.
    let durability = snapshot.theme(Theme::Durability).expect("durability stat");
    assert!(durability.negative_share > 0.5);
    assert!(!durability.top_phrases.is_empty());
}

#[test]
fn mixed_batch_fires_durability_and_rating_health() {
    let now = reference_now();
    let records = mixed_batch(now);
    let snapshot = AggregationEngine::new().aggregate_at(&records, now);

    let insights = InsightRuleEngine::new().evaluate(InsightInput::new(&snapshot, &records));

    let durability = insights
        .iter()
        .find(|i| i.rule == "durability_issues")
        .expect("durability insight");
    assert_eq!(durability.priority, Priority::High);

    // Mean rating is (6*5 + 4*1) / 10 = 3.4: inside the <3.5 "high"
    // band, not the <2.5 critical one.
    let rating = insights
        .iter()
        .find(|i| i.rule == "rating_health")
        .expect("rating health insight");
    assert_eq!(rating.priority, Priority::High);
    assert_eq!(rating.category, InsightCategory::RatingHealth);

    // "tarnish" appears in all four complaints: quick win fires.
    assert!(insights.iter().any(|i| i.rule == "quick_win:tarnish"));

    // Output is priority-sorted, descending.
    for pair in insights.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
}

#[test]
fn ingestion_is_deterministic_per_text() {
    let pipeline = IngestPipeline::new();
    let now = reference_now();

    let a = ingest(&pipeline, "Rings", 4, "Love the elegant design", 0, now);
    let b = ingest(&pipeline, "Rings", 4, "Love the elegant design", 0, now);

    assert_eq!(a.sentiment.score, b.sentiment.score);
    assert_eq!(a.sentiment.label, b.sentiment.label);
    assert_eq!(a.sentiment.confidence, b.sentiment.confidence);
    assert_eq!(a.themes, b.themes);
}

#[test]
fn duplicate_reviews_are_down_weighted() {
    let pipeline = IngestPipeline::new();
    let now = reference_now();

    let text = "Love this necklace, excellent quality";
    let duplicates: Vec<FeedbackRecord> = (0..3)
        .map(|_| ingest(&pipeline, "Necklaces", 5, text, 0, now))
        .collect();

    let snapshot = AggregationEngine::new().aggregate_at(&duplicates, now);

    // Dedupe factors 1, 1/sqrt(2), 1/sqrt(3) over a weight of 1 each
    // (full confidence, zero age).
    let expected = 1.0 + 1.0 / 2.0_f64.sqrt() + 1.0 / 3.0_f64.sqrt();
    assert!((snapshot.effective_total - expected).abs() < 1e-9);
}

#[test]
fn stale_records_decay_toward_zero() {
    let pipeline = IngestPipeline::new();
    let now = reference_now();

    let fresh = vec![ingest(&pipeline, "Rings", 5, "Love it, excellent", 0, now)];
    let stale = vec![ingest(&pipeline, "Rings", 5, "Love it, excellent", 365, now)];

    let engine = AggregationEngine::new();
    let fresh_total = engine.aggregate_at(&fresh, now).effective_total;
    let stale_total = engine.aggregate_at(&stale, now).effective_total;

    assert!(fresh_total > stale_total * 100.0);
}

#[test]
fn snapshot_and_insights_serialize() {
    let now = reference_now();
    let records = mixed_batch(now);
    let snapshot = AggregationEngine::new().aggregate_at(&records, now);
    let insights = InsightRuleEngine::new().evaluate(InsightInput::new(&snapshot, &records));

    let snapshot_json = serde_json::to_string(&snapshot).expect("snapshot serializes");
    assert!(snapshot_json.contains("positive_pct"));

    let insights_json = serde_json::to_string(&insights).expect("insights serialize");
    assert!(insights_json.contains("recommended_action"));

    // Records round-trip, preserving the derived fields untouched.
    let record_json = serde_json::to_string(&records[0]).expect("record serializes");
    let restored: FeedbackRecord = serde_json::from_str(&record_json).expect("record restores");
    assert_eq!(restored.sentiment.label, records[0].sentiment.label);
    assert_eq!(restored.themes, records[0].themes);
}

#[test]
fn neutral_unmatched_reviews_flow_through() {
    let pipeline = IngestPipeline::new();
    let now = reference_now();

    let records = vec![ingest(&pipeline, "Bracelets", 3, "arrived on a tuesday", 0, now)];
    assert_eq!(records[0].sentiment.label, SentimentLabel::Neutral);
    assert_eq!(records[0].themes, vec![Theme::Other]);

    let snapshot = AggregationEngine::new().aggregate_at(&records, now);
    // Confidence floor keeps the record contributing.
    assert!(snapshot.effective_total > 0.0);
    assert!(snapshot.insufficient_data);
    assert!(snapshot.theme(Theme::Other).is_some());
}
