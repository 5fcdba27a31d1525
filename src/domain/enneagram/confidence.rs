//! Confidence Classifier - margin between the two leading types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scoring::ProbabilityDistribution;

/// Lead at or above which the result is `high`.
pub const HIGH_LEAD: f64 = 0.20;

/// Lead at or above which the result is `medium`.
pub const MEDIUM_LEAD: f64 = 0.07;

/// Absorbs representation error so that a lead of exactly 0.20 stays `high`.
const TOLERANCE: f64 = 1e-9;

/// Qualitative confidence in the Stage-1 result. Recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    /// Classifies a distribution by the gap between its top two shares.
    ///
    /// # Edge Cases
    /// - Fewer than two distinct values (e.g. uniform): `Low`
    /// - Boundaries are inclusive
    pub fn classify(probabilities: &ProbabilityDistribution) -> Self {
        match lead(probabilities) {
            Some(lead) if lead + TOLERANCE >= HIGH_LEAD => ConfidenceBand::High,
            Some(lead) if lead + TOLERANCE >= MEDIUM_LEAD => ConfidenceBand::Medium,
            _ => ConfidenceBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "high",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::Low => "low",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, ConfidenceBand::High)
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gap between the two largest shares, or `None` when the distribution has
/// fewer than two distinct values.
pub fn lead(probabilities: &ProbabilityDistribution) -> Option<f64> {
    let mut values: Vec<f64> = probabilities.values().copied().collect();
    values.sort_by(|a, b| b.total_cmp(a));

    let first = *values.first()?;
    let has_distinct = values.iter().any(|v| *v != first);
    if !has_distinct || values.len() < 2 {
        return None;
    }
    Some(first - values[1])
}
