//! Subcommand implementations.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{info, warn};

use pulse_common::validate_new_feedback;
use pulse_engine::{
    AggregationConfig, AggregationEngine, FeedbackRecord, IngestPipeline, InsightInput,
    InsightRuleEngine, NewFeedback, SentimentAnalyzer, ThemeDetector,
};

/// Sample feedback for dashboard demos: (product_id, rating, review text).
const SAMPLE_FEEDBACK: &[(&str, u8, &str)] = &[
    ("Rings", 5, "Love this ring! It's so elegant and shiny. Perfect for special occasions."),
    ("Rings", 4, "Beautiful design but it feels a bit heavy when worn for long periods."),
    ("Rings", 2, "The ring broke after just a few weeks. Poor quality and fragile."),
    ("Earrings", 5, "Stunning earrings! They look gorgeous and are very comfortable to wear."),
    ("Earrings", 3, "The design is nice but they feel heavy and uncomfortable after a while."),
    ("Necklaces", 5, "Excellent quality! The necklace is elegant and the finish is perfect."),
    ("Necklaces", 1, "Terrible! The chain broke on the first day. Very disappointed with the durability."),
    ("Bracelets", 4, "Good bracelet, fits well and looks beautiful. The polish is nice."),
    ("Bracelets", 3, "It's okay but not as shiny as I expected. The design is average."),
    ("Pendants", 5, "Amazing pendant! Love the design and it's very well made. Highly recommend!"),
    ("Pendants", 2, "The pendant looks dull and the quality is poor. Not worth the price."),
    ("Rings", 4, "Great ring! It's comfortable and the appearance is elegant. No complaints."),
    ("Earrings", 5, "Perfect earrings! They are light, comfortable, and absolutely beautiful."),
    ("Necklaces", 3, "The necklace is fine but feels heavy. The design could be better."),
    ("Bracelets", 5, "Outstanding bracelet! Excellent quality, durable, and looks fantastic."),
];

/// Write the sample records as JSON Lines, staggered back in time so the
/// decay weighting has something to bite on.
pub fn seed(output: &Path) -> Result<()> {
    let pipeline = IngestPipeline::new();
    let now = Utc::now();

    let file = File::create(output)
        .with_context(|| format!("creating record file {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0usize;
    for (i, &(product_id, rating, review_text)) in SAMPLE_FEEDBACK.iter().enumerate() {
        if let Err(e) = validate_new_feedback(product_id, rating, review_text) {
            warn!(product_id, %e, "skipping invalid sample");
            continue;
        }

        let record = pipeline.ingest_at(
            NewFeedback {
                product_id: product_id.to_string(),
                rating,
                review_text: review_text.to_string(),
            },
            now - Duration::days(i as i64 * 3),
        );

        serde_json::to_writer(&mut writer, &record).context("serializing record")?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;

    info!(written, path = %output.display(), "seeded sample feedback");
    println!("Seeded {written} feedback records into {}", output.display());
    Ok(())
}

/// Analyze one review text and print the enrichment as JSON.
pub fn analyze(text: &str, explain: bool) -> Result<()> {
    let analyzer = SentimentAnalyzer::new();
    let detector = ThemeDetector::new();

    let themes = detector.detect(text);

    let output = if explain {
        let trace = analyzer.explain(text);
        json!({
            "sentiment": trace.result,
            "themes": themes,
            "trace": {
                "tokens": trace.tokens,
                "matches": trace.matches,
                "negation_positions": trace.negation_positions,
                "raw_total": trace.raw_total,
            },
        })
    } else {
        json!({
            "sentiment": analyzer.analyze(text),
            "themes": themes,
        })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Load records, aggregate them, evaluate the insight rules, and print
/// the combined report.
pub fn report(
    input: &Path,
    as_json: bool,
    half_life_days: Option<f64>,
    min_confidence: Option<f64>,
) -> Result<()> {
    let records = load_records(input)?;
    info!(count = records.len(), path = %input.display(), "loaded records");

    let mut config = AggregationConfig::default();
    if let Some(days) = half_life_days {
        config.half_life_days = days;
    }
    if let Some(floor) = min_confidence {
        config.min_confidence = floor;
    }

    let snapshot = AggregationEngine::with_config(config).aggregate(&records);
    let insights = InsightRuleEngine::new().evaluate(InsightInput::new(&snapshot, &records));

    if as_json {
        let report = json!({ "snapshot": snapshot, "insights": insights });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Feedback report ({} records)", snapshot.record_count);
    println!(
        "  sentiment: {:.1}% positive / {:.1}% negative / {:.1}% neutral",
        snapshot.positive_pct, snapshot.negative_pct, snapshot.neutral_pct
    );
    println!("  effective sample size: {:.2}", snapshot.effective_total);
    if snapshot.insufficient_data {
        println!("  WARNING: insufficient data - treat these numbers with caution");
    }

    println!("\nThemes:");
    for stat in &snapshot.themes {
        println!(
            "  {:<11} count {:>6.2}  confidence {:.2}  negative share {:>3.0}%",
            stat.theme.to_string(),
            stat.effective_count,
            stat.confidence,
            stat.negative_share * 100.0
        );
        for phrase in &stat.top_phrases {
            println!("      \"{}\" x{}", phrase.phrase, phrase.count);
        }
    }

    println!("\nInsights:");
    if insights.is_empty() {
        println!("  (none fired)");
    }
    for insight in &insights {
        println!("  [{}] {}", insight.priority, insight.message);
        println!("      {}", insight.detail);
        println!(
            "      action: {} (impact {}, effort {}, confidence {:.2})",
            insight.recommended_action, insight.impact, insight.effort, insight.confidence
        );
    }

    Ok(())
}

/// Read a JSON Lines record file, skipping blank lines.
fn load_records(input: &Path) -> Result<Vec<FeedbackRecord>> {
    let file = File::open(input)
        .with_context(|| format!("opening record file {}", input.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("reading record file")?;
        if line.trim().is_empty() {
            continue;
        }

        let record: FeedbackRecord = serde_json::from_str(&line)
            .with_context(|| format!("parsing record on line {}", line_no + 1))?;
        records.push(record);
    }

    Ok(records)
}
