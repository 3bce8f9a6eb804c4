//! Quick-win pattern catalogue and shared rule helpers.

use crate::record::FeedbackRecord;
use crate::sentiment::SentimentLabel;

use super::types::{Effort, Impact};

/// A recurring, keyword-identifiable complaint with a canned remediation.
#[derive(Debug, Clone, Copy)]
pub struct QuickWinPattern {
    /// Lowercase substring searched in review text.
    pub pattern: &'static str,
    pub action: &'static str,
    pub impact: Impact,
    pub effort: Effort,
}

/// Fixed pattern table, in evaluation order.
pub const QUICK_WIN_PATTERNS: &[QuickWinPattern] = &[
    QuickWinPattern {
        pattern: "too heavy",
        action: "Offer a lighter variant and publish item weight on the product page",
        impact: Impact::High,
        effort: Effort::Medium,
    },
    QuickWinPattern {
        pattern: "packaging",
        action: "Review protective packaging with the fulfillment vendor",
        impact: Impact::Medium,
        effort: Effort::Low,
    },
    QuickWinPattern {
        pattern: "arrived damaged",
        action: "Audit the shipping pipeline and add transit padding",
        impact: Impact::High,
        effort: Effort::Low,
    },
    QuickWinPattern {
        pattern: "tarnish",
        action: "Add anti-tarnish coating and include care instructions",
        impact: Impact::High,
        effort: Effort::Medium,
    },
    QuickWinPattern {
        pattern: "clasp",
        action: "Source a sturdier clasp component",
        impact: Impact::Medium,
        effort: Effort::Low,
    },
    QuickWinPattern {
        pattern: "scratch",
        action: "Revise the finishing process for scratch resistance",
        impact: Impact::Medium,
        effort: Effort::Medium,
    },
];

/// Share of records labeled Negative, in [0, 1]. Zero for empty input.
pub(crate) fn negative_label_share(records: &[&FeedbackRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let negatives = records
        .iter()
        .filter(|r| r.sentiment.label == SentimentLabel::Negative)
        .count();
    negatives as f64 / records.len() as f64
}

/// Mean star rating. Zero for empty input.
pub(crate) fn mean_rating(records: &[&FeedbackRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let sum: u32 = records.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / records.len() as f64
}

/// Deterministic confidence from the number of supporting records:
/// starts at 0.5 and saturates at 0.95.
pub(crate) fn evidence_confidence(supporting: usize) -> f64 {
    (0.5 + supporting as f64 * 0.05).min(0.95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{IngestPipeline, NewFeedback};

    fn record(rating: u8, text: &str) -> FeedbackRecord {
        IngestPipeline::new().ingest(NewFeedback {
            product_id: "Rings".to_string(),
            rating,
            review_text: text.to_string(),
        })
    }

    #[test]
    fn test_negative_label_share() {
        let negative = record(1, "terrible awful broken waste");
        let positive = record(5, "love it, excellent");
        let refs: Vec<&FeedbackRecord> = vec![&negative, &positive];
        assert_eq!(negative_label_share(&refs), 0.5);
        assert_eq!(negative_label_share(&[]), 0.0);
    }

    #[test]
    fn test_mean_rating() {
        let a = record(5, "x");
        let b = record(2, "y");
        let refs: Vec<&FeedbackRecord> = vec![&a, &b];
        assert_eq!(mean_rating(&refs), 3.5);
    }

    #[test]
    fn test_evidence_confidence_saturates() {
        assert_eq!(evidence_confidence(0), 0.5);
        assert_eq!(evidence_confidence(2), 0.6);
        assert_eq!(evidence_confidence(100), 0.95);
    }

    #[test]
    fn test_pattern_table_is_lowercase() {
        for entry in QUICK_WIN_PATTERNS {
            assert_eq!(entry.pattern, entry.pattern.to_lowercase());
        }
    }
}
