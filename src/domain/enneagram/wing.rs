//! Wing Estimator.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scoring::TypeScores;
use super::types::EnneagramType;

/// Primary type plus the adjacent type that colours it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WingEstimate {
    pub primary: EnneagramType,
    pub wing: EnneagramType,
}

impl WingEstimate {
    /// Picks the more probable neighbour of `primary`.
    ///
    /// On equal probability the neighbour earlier in 1..9 wins, so a tie for
    /// type 1 goes to 2 and a tie for type 9 goes to 1.
    pub fn estimate(primary: EnneagramType, scores: &TypeScores) -> Self {
        let left = primary.left_neighbor();
        let right = primary.right_neighbor();
        let (p_left, p_right) = (scores.probability(left), scores.probability(right));

        let wing = if p_left > p_right {
            left
        } else if p_right > p_left {
            right
        } else {
            left.min(right)
        };

        Self { primary, wing }
    }

    /// Label such as `4w5`.
    pub fn label(&self) -> String {
        format!("{}w{}", self.primary, self.wing)
    }
}

impl fmt::Display for WingEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}w{}", self.primary, self.wing)
    }
}
