//! Instinct Scorer - raw sp/so/sx sums and the dominant instinct.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::response::{dedup_first_seen, LikertResponse};
use super::types::Instinct;

/// Raw instinct sums. No normalization is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstinctScores {
    pub sp: u32,
    pub so: u32,
    pub sx: u32,
    pub dominant: Instinct,
}

impl InstinctScores {
    /// Builds scores from sums, deriving `dominant`.
    pub fn from_sums(sp: u32, so: u32, sx: u32) -> Self {
        Self {
            sp,
            so,
            sx,
            dominant: dominant_of(sp, so, sx),
        }
    }

    pub fn get(&self, instinct: Instinct) -> u32 {
        match instinct {
            Instinct::Sp => self.sp,
            Instinct::So => self.so,
            Instinct::Sx => self.sx,
        }
    }

    pub fn total(&self) -> u32 {
        self.sp + self.so + self.sx
    }
}

/// Argmax with ties going to the earlier of `sp, so, sx`.
fn dominant_of(sp: u32, so: u32, sx: u32) -> Instinct {
    let mut best = Instinct::Sp;
    let mut best_score = sp;
    for (instinct, score) in [(Instinct::So, so), (Instinct::Sx, sx)] {
        if score > best_score {
            best = instinct;
            best_score = score;
        }
    }
    best
}

pub struct InstinctScorer;

impl InstinctScorer {
    /// Sums instinct answers with the same dedup and skip rules as Stage 1.
    pub fn score(instinct_map: &HashMap<String, Instinct>, responses: &[LikertResponse]) -> InstinctScores {
        let (mut sp, mut so, mut sx) = (0u32, 0u32, 0u32);
        for response in dedup_first_seen(responses) {
            let value = u32::from(response.value.value());
            match instinct_map.get(&response.item_id) {
                Some(Instinct::Sp) => sp += value,
                Some(Instinct::So) => so += value,
                Some(Instinct::Sx) => sx += value,
                None => {}
            }
        }
        InstinctScores::from_sums(sp, so, sx)
    }
}
