//! Insight output types.

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateSnapshot;
use crate::record::FeedbackRecord;

/// Urgency of an insight. Declaration order is rank order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric rank used for descending sorts (critical=3 .. low=0).
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Expected business impact of acting on an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Estimated effort to act on an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Which family of rules produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsightCategory {
    OverallHealth,
    ThemeIssue,
    RatingHealth,
    Contradiction,
    ProductPerformance,
    QuickWin,
}

impl std::fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverallHealth => write!(f, "overall-health"),
            Self::ThemeIssue => write!(f, "theme-issue"),
            Self::RatingHealth => write!(f, "rating-health"),
            Self::Contradiction => write!(f, "contradiction"),
            Self::ProductPerformance => write!(f, "product-performance"),
            Self::QuickWin => write!(f, "quick-win"),
        }
    }
}

/// One actionable finding.
///
/// Generated fresh on each evaluation; never persisted or deduplicated
/// across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    /// Stable identifier of the rule (or rule variant) that fired.
    pub rule: String,
    pub message: String,
    pub detail: String,
    pub recommended_action: String,
    pub priority: Priority,
    /// Confidence in [0.0, 1.0], derived from the evidence size.
    pub confidence: f64,
    pub impact: Impact,
    pub effort: Effort,
}

/// Inputs to one rule-engine evaluation.
///
/// Some rules read the aggregate snapshot, some the raw records; either
/// may be absent, and rules missing their input are skipped.
#[derive(Clone, Copy, Default)]
pub struct InsightInput<'a> {
    pub snapshot: Option<&'a AggregateSnapshot>,
    pub records: Option<&'a [FeedbackRecord]>,
}

impl<'a> InsightInput<'a> {
    /// Evaluate against the snapshot only.
    pub fn from_snapshot(snapshot: &'a AggregateSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            records: None,
        }
    }

    /// Evaluate against the raw records only.
    pub fn from_records(records: &'a [FeedbackRecord]) -> Self {
        Self {
            snapshot: None,
            records: Some(records),
        }
    }

    /// Evaluate against both inputs.
    pub fn new(snapshot: &'a AggregateSnapshot, records: &'a [FeedbackRecord]) -> Self {
        Self {
            snapshot: Some(snapshot),
            records: Some(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert_eq!(Priority::Critical.rank(), 3);
        assert_eq!(Priority::High.rank(), 2);
        assert_eq!(Priority::Medium.rank(), 1);
        assert_eq!(Priority::Low.rank(), 0);
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Critical.to_string(), "critical");
        assert_eq!(Priority::Low.to_string(), "low");
    }
}
