//! Rule evaluation over aggregates and raw records.
//!
//! Every rule is independent, stateless, and evaluated unconditionally;
//! a rule emits at most one insight, and rules whose input (snapshot or
//! records) is absent are skipped without error. The final list is
//! sorted by priority, descending; ties keep catalogue order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::debug;

use super::rules::{
    evidence_confidence, mean_rating, negative_label_share, QuickWinPattern, QUICK_WIN_PATTERNS,
};
use super::types::{Effort, Impact, Insight, InsightCategory, InsightInput, Priority};
use crate::aggregate::AggregateSnapshot;
use crate::record::FeedbackRecord;
use crate::sentiment::SentimentLabel;
use crate::themes::Theme;

// ============================================================================
// Configuration
// ============================================================================

/// Thresholds for the rule catalogue.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Durability: negative share above this fires, among records with
    /// sentiment confidence at or above `theme_min_confidence`.
    pub durability_negative_share: f64,
    /// Comfort, per-record variant: negative share above this fires.
    pub comfort_negative_share: f64,
    /// Comfort, aggregate variant: weighted negative share above this
    /// fires. Kept as a second, distinct rule (which variant is
    /// authoritative is an open product question).
    pub comfort_aggregate_negative_share: f64,
    /// Appearance: negative share above this fires, among records with
    /// sentiment confidence at or above `theme_min_confidence`.
    pub appearance_negative_share: f64,
    /// Confidence filter used by the Durability and Appearance rules.
    pub theme_min_confidence: f64,
    /// Mean rating below this is critical.
    pub critical_rating: f64,
    /// Mean rating below this (but not critical) is high priority.
    pub warning_rating: f64,
    /// Sentiment confidence a contradiction must exceed to count.
    pub contradiction_min_confidence: f64,
    /// Product groups smaller than this are ignored entirely.
    pub min_product_records: usize,
    /// Underperforming product: mean rating below this...
    pub underperforming_rating: f64,
    /// ...and negative share above this.
    pub underperforming_negative_share: f64,
    /// Star product: mean rating at or above this...
    pub star_rating: f64,
    /// ...across at least this many records.
    pub star_min_records: usize,
    /// Records that must mention a quick-win pattern for it to fire.
    pub quick_win_min_mentions: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            durability_negative_share: 0.4,
            comfort_negative_share: 0.3,
            comfort_aggregate_negative_share: 0.5,
            appearance_negative_share: 0.6,
            theme_min_confidence: 0.6,
            critical_rating: 2.5,
            warning_rating: 3.5,
            contradiction_min_confidence: 0.5,
            min_product_records: 2,
            underperforming_rating: 3.0,
            underperforming_negative_share: 0.5,
            star_rating: 4.5,
            star_min_records: 3,
            quick_win_min_mentions: 2,
        }
    }
}

// ============================================================================
// Rule Engine
// ============================================================================

/// Insight rule engine over an injected configuration.
#[derive(Debug, Clone, Default)]
pub struct InsightRuleEngine {
    config: InsightConfig,
}

impl InsightRuleEngine {
    /// Create an engine with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Evaluate the full rule catalogue.
    pub fn evaluate(&self, input: InsightInput<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        if let Some(snapshot) = input.snapshot {
            insights.extend(self.overall_health(snapshot));
        }

        if let Some(records) = input.records {
            insights.extend(self.theme_issue(
                records,
                Theme::Durability,
                Some(self.config.theme_min_confidence),
                self.config.durability_negative_share,
                Priority::High,
                "durability_issues",
                "Escalate durability defects to the quality team",
            ));
            insights.extend(self.theme_issue(
                records,
                Theme::Comfort,
                None,
                self.config.comfort_negative_share,
                Priority::Medium,
                "comfort_issues",
                "Review weight and fit feedback with the design team",
            ));
        }

        if let Some(snapshot) = input.snapshot {
            insights.extend(self.comfort_issue_aggregate(snapshot));
        }

        if let Some(records) = input.records {
            insights.extend(self.theme_issue(
                records,
                Theme::Appearance,
                Some(self.config.theme_min_confidence),
                self.config.appearance_negative_share,
                Priority::High,
                "appearance_issues",
                "Review finish and plating quality with the supplier",
            ));
            insights.extend(self.rating_health(records));
            insights.extend(self.contradiction(
                records,
                "contradiction_positive_rating",
                "high rating with negative text",
                |r| r.rating >= 4 && r.sentiment.label == SentimentLabel::Negative,
            ));
            insights.extend(self.contradiction(
                records,
                "contradiction_negative_rating",
                "low rating with positive text",
                |r| r.rating <= 2 && r.sentiment.label == SentimentLabel::Positive,
            ));
            insights.extend(self.underperforming_products(records));
            insights.extend(self.star_products(records));
            insights.extend(self.quick_wins(records));
        }

        // Stable sort keeps catalogue order within each priority band.
        insights.sort_by_key(|insight| Reverse(insight.priority));

        debug!(count = insights.len(), "evaluated insight rules");
        insights
    }

    // ========================================================================
    // Rules
    // ========================================================================

    fn overall_health(&self, snapshot: &AggregateSnapshot) -> Option<Insight> {
        if snapshot.negative_pct <= snapshot.positive_pct {
            return None;
        }

        Some(Insight {
            category: InsightCategory::OverallHealth,
            rule: "overall_health".to_string(),
            message: "Negative feedback outweighs positive".to_string(),
            detail: format!(
                "Weighted sentiment is {:.1}% negative vs {:.1}% positive over an effective sample of {:.1}",
                snapshot.negative_pct, snapshot.positive_pct, snapshot.effective_total
            ),
            recommended_action: "Triage the dominant complaint themes before they spread".to_string(),
            priority: Priority::High,
            confidence: evidence_confidence(snapshot.effective_total as usize),
            impact: Impact::High,
            effort: Effort::Medium,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn theme_issue(
        &self,
        records: &[FeedbackRecord],
        theme: Theme,
        min_confidence: Option<f64>,
        threshold: f64,
        priority: Priority,
        rule: &str,
        action: &str,
    ) -> Option<Insight> {
        let tagged: Vec<&FeedbackRecord> =
            records.iter().filter(|r| r.has_theme(theme)).collect();
        if tagged.is_empty() {
            return None;
        }

        let eligible: Vec<&FeedbackRecord> = match min_confidence {
            Some(floor) => tagged
                .into_iter()
                .filter(|r| r.sentiment.confidence >= floor)
                .collect(),
            None => tagged,
        };
        if eligible.is_empty() {
            return None;
        }

        let share = negative_label_share(&eligible);
        if share <= threshold {
            return None;
        }

        Some(Insight {
            category: InsightCategory::ThemeIssue,
            rule: rule.to_string(),
            message: format!("{theme} complaints are elevated"),
            detail: format!(
                "{:.0}% of {} {theme}-tagged reviews are negative",
                share * 100.0,
                eligible.len()
            ),
            recommended_action: action.to_string(),
            priority,
            confidence: evidence_confidence(eligible.len()),
            impact: Impact::High,
            effort: Effort::Medium,
        })
    }

    /// Aggregate-only Comfort variant: reads the weighted negative share
    /// straight from the snapshot.
    fn comfort_issue_aggregate(&self, snapshot: &AggregateSnapshot) -> Option<Insight> {
        let stat = snapshot.theme(Theme::Comfort)?;
        if stat.negative_share <= self.config.comfort_aggregate_negative_share {
            return None;
        }

        Some(Insight {
            category: InsightCategory::ThemeIssue,
            rule: "comfort_issues_aggregate".to_string(),
            message: "Comfort complaints dominate the weighted aggregate".to_string(),
            detail: format!(
                "{:.0}% of Comfort's weighted mentions are negatively rated (effective count {:.1})",
                stat.negative_share * 100.0,
                stat.effective_count
            ),
            recommended_action: "Review weight and fit feedback with the design team".to_string(),
            priority: Priority::Medium,
            confidence: evidence_confidence(stat.effective_count as usize),
            impact: Impact::High,
            effort: Effort::Medium,
        })
    }

    fn rating_health(&self, records: &[FeedbackRecord]) -> Option<Insight> {
        if records.is_empty() {
            return None;
        }

        let refs: Vec<&FeedbackRecord> = records.iter().collect();
        let mean = mean_rating(&refs);

        let (priority, message) = if mean < self.config.critical_rating {
            (Priority::Critical, "Average rating is critically low")
        } else if mean < self.config.warning_rating {
            (Priority::High, "Average rating is below the healthy range")
        } else {
            return None;
        };

        Some(Insight {
            category: InsightCategory::RatingHealth,
            rule: "rating_health".to_string(),
            message: message.to_string(),
            detail: format!("Average rating is {mean:.2} across {} reviews", records.len()),
            recommended_action: "Run a root-cause review of recent 1-2 star feedback".to_string(),
            priority,
            confidence: evidence_confidence(records.len()),
            impact: Impact::High,
            effort: Effort::Medium,
        })
    }

    fn contradiction(
        &self,
        records: &[FeedbackRecord],
        rule: &str,
        description: &str,
        matches: impl Fn(&FeedbackRecord) -> bool,
    ) -> Option<Insight> {
        let count = records
            .iter()
            .filter(|r| matches(r) && r.sentiment.confidence > self.config.contradiction_min_confidence)
            .count();
        if count == 0 {
            return None;
        }

        Some(Insight {
            category: InsightCategory::Contradiction,
            rule: rule.to_string(),
            message: format!("{count} reviews pair a {description}"),
            detail: format!(
                "{count} reviews combine a {description} at sentiment confidence above {:.1}",
                self.config.contradiction_min_confidence
            ),
            recommended_action: "Manually review mismatched feedback for mis-entered ratings"
                .to_string(),
            priority: Priority::Medium,
            confidence: evidence_confidence(count),
            impact: Impact::Low,
            effort: Effort::Low,
        })
    }

    fn product_groups<'a>(
        &self,
        records: &'a [FeedbackRecord],
    ) -> BTreeMap<&'a str, Vec<&'a FeedbackRecord>> {
        let mut groups: BTreeMap<&str, Vec<&FeedbackRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.product_id.as_str()).or_default().push(record);
        }
        groups.retain(|_, group| group.len() >= self.config.min_product_records);
        groups
    }

    fn underperforming_products(&self, records: &[FeedbackRecord]) -> Option<Insight> {
        let failing: Vec<String> = self
            .product_groups(records)
            .iter()
            .filter_map(|(product_id, group)| {
                let mean = mean_rating(group);
                let share = negative_label_share(group);
                (mean < self.config.underperforming_rating
                    && share > self.config.underperforming_negative_share)
                    .then(|| format!("{product_id} (avg {mean:.1}, {:.0}% negative)", share * 100.0))
            })
            .collect();
        if failing.is_empty() {
            return None;
        }

        Some(Insight {
            category: InsightCategory::ProductPerformance,
            rule: "underperforming_products".to_string(),
            message: format!("{} product(s) are underperforming", failing.len()),
            detail: failing.join("; "),
            recommended_action: "Consider reworking or pulling the affected products".to_string(),
            priority: Priority::Critical,
            confidence: evidence_confidence(failing.len() * self.config.min_product_records),
            impact: Impact::High,
            effort: Effort::High,
        })
    }

    fn star_products(&self, records: &[FeedbackRecord]) -> Option<Insight> {
        let stars: Vec<String> = self
            .product_groups(records)
            .iter()
            .filter_map(|(product_id, group)| {
                let mean = mean_rating(group);
                (group.len() >= self.config.star_min_records && mean >= self.config.star_rating)
                    .then(|| format!("{product_id} (avg {mean:.1} over {} reviews)", group.len()))
            })
            .collect();
        if stars.is_empty() {
            return None;
        }

        Some(Insight {
            category: InsightCategory::ProductPerformance,
            rule: "star_products".to_string(),
            message: format!("{} star product(s) identified", stars.len()),
            detail: stars.join("; "),
            recommended_action: "Feature these products in marketing and restock ahead of demand"
                .to_string(),
            priority: Priority::Low,
            confidence: evidence_confidence(stars.len() * self.config.star_min_records),
            impact: Impact::Medium,
            effort: Effort::Low,
        })
    }

    fn quick_wins(&self, records: &[FeedbackRecord]) -> Vec<Insight> {
        let lowered: Vec<String> = records
            .iter()
            .map(|r| r.review_text.to_lowercase())
            .collect();

        QUICK_WIN_PATTERNS
            .iter()
            .filter_map(|entry| self.quick_win(entry, &lowered))
            .collect()
    }

    /// One pattern is one rule: it fires at most once, however many
    /// records mention it.
    fn quick_win(&self, entry: &QuickWinPattern, lowered_texts: &[String]) -> Option<Insight> {
        let mentions = lowered_texts
            .iter()
            .filter(|text| text.contains(entry.pattern))
            .count();
        if mentions < self.config.quick_win_min_mentions {
            return None;
        }

        Some(Insight {
            category: InsightCategory::QuickWin,
            rule: format!("quick_win:{}", entry.pattern),
            message: format!("Recurring mention: \"{}\"", entry.pattern),
            detail: format!("{mentions} reviews mention \"{}\"", entry.pattern),
            recommended_action: entry.action.to_string(),
            priority: Priority::Medium,
            confidence: evidence_confidence(mentions),
            impact: entry.impact,
            effort: entry.effort,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
