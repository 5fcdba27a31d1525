//! Stage-1 Scorer - turns screener answers into per-type sums and shares.
//!
//! Probabilities are plain ratios of the raw sums. No smoothing is applied,
//! so small samples produce sparse, skewed distributions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::response::{dedup_first_seen, LikertResponse};
use super::types::EnneagramType;

/// Summed Likert values per type. All nine keys are always present.
pub type RawScores = BTreeMap<EnneagramType, u32>;

/// Normalized share per type. All nine keys are always present.
pub type ProbabilityDistribution = BTreeMap<EnneagramType, f64>;

/// Output of the Stage-1 scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeScores {
    pub raw: RawScores,
    pub probabilities: ProbabilityDistribution,
}

impl TypeScores {
    /// Types with their probability, highest first. Equal probabilities keep
    /// canonical order 1..9.
    pub fn ranked(&self) -> Vec<(EnneagramType, f64)> {
        rank(&self.probabilities)
    }

    /// The `n` most probable types.
    pub fn top(&self, n: usize) -> Vec<EnneagramType> {
        self.ranked().into_iter().take(n).map(|(t, _)| t).collect()
    }

    pub fn primary_type(&self) -> EnneagramType {
        self.ranked()
            .first()
            .map(|(t, _)| *t)
            .unwrap_or(EnneagramType::One)
    }

    pub fn probability(&self, t: EnneagramType) -> f64 {
        self.probabilities.get(&t).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> u32 {
        self.raw.values().sum()
    }
}

/// Ranks a distribution descending with canonical tie-break.
pub fn rank(probabilities: &ProbabilityDistribution) -> Vec<(EnneagramType, f64)> {
    let mut ranked: Vec<(EnneagramType, f64)> = probabilities.iter().map(|(t, p)| (*t, *p)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Distribution with 1/9 on every type.
pub fn uniform_distribution() -> ProbabilityDistribution {
    EnneagramType::ALL.iter().map(|t| (*t, 1.0 / 9.0)).collect()
}

/// Scorer for the screener stage.
pub struct Stage1Scorer;

impl Stage1Scorer {
    /// Aggregates screener answers.
    ///
    /// # Edge Cases
    /// - Duplicate item ids: only the first occurrence counts
    /// - Ids missing from `type_map`: skipped
    /// - Zero total: uniform distribution
    pub fn score(type_map: &HashMap<String, EnneagramType>, responses: &[LikertResponse]) -> TypeScores {
        let mut raw: RawScores = EnneagramType::ALL.iter().map(|t| (*t, 0)).collect();

        for response in dedup_first_seen(responses) {
            if let Some(t) = type_map.get(&response.item_id) {
                *raw.entry(*t).or_insert(0) += u32::from(response.value.value());
            }
        }

        let total: u32 = raw.values().sum();
        let probabilities = if total == 0 {
            uniform_distribution()
        } else {
            raw.iter()
                .map(|(t, sum)| (*t, f64::from(*sum) / f64::from(total)))
                .collect()
        };

        TypeScores { raw, probabilities }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::item_bank::ItemBank;
    use crate::domain::foundation::{Likert, Locale};

    fn type_map() -> HashMap<String, EnneagramType> {
        ItemBank::load().unwrap().item_type_map(Locale::En).clone()
    }

    fn answer(id: &str, v: u8) -> LikertResponse {
        LikertResponse::new(id, Likert::try_from_u8(v).unwrap())
    }

    #[test]
    fn empty_responses_give_exact_uniform() {
        let scores = Stage1Scorer::score(&type_map(), &[]);
        assert_eq!(scores.raw.len(), 9);
        assert!(scores.raw.values().all(|v| *v == 0));
        for p in scores.probabilities.values() {
            assert_eq!(*p, 1.0 / 9.0);
        }
    }

    #[test]
    fn all_unmapped_responses_give_uniform() {
        let scores = Stage1Scorer::score(&type_map(), &[answer("nope", 5), answer("i_01", 4)]);
        assert_eq!(scores.total(), 0);
        assert_eq!(scores.probability(EnneagramType::Four), 1.0 / 9.0);
    }

    #[test]
    fn five_type_one_answers_concentrate_all_mass() {
        let responses: Vec<_> = (1..=5).map(|n| answer(&format!("s1_0{}", n), 5)).collect();
        let scores = Stage1Scorer::score(&type_map(), &responses);
        assert_eq!(scores.raw[&EnneagramType::One], 25);
        assert_eq!(scores.probability(EnneagramType::One), 1.0);
        assert_eq!(scores.probability(EnneagramType::Two), 0.0);
        assert_eq!(scores.primary_type(), EnneagramType::One);
    }

    #[test]
    fn duplicate_ids_count_once() {
        let once = Stage1Scorer::score(&type_map(), &[answer("s1_06", 4)]);
        let twice = Stage1Scorer::score(&type_map(), &[answer("s1_06", 4), answer("s1_06", 1)]);
        assert_eq!(once, twice);
    }

    #[test]
    fn ranking_breaks_ties_canonically() {
        let responses = vec![answer("s1_45", 5), answer("s1_21", 5), answer("s1_06", 5)];
        let scores = Stage1Scorer::score(&type_map(), &responses);
        assert_eq!(
            scores.top(4),
            vec![EnneagramType::Two, EnneagramType::Five, EnneagramType::Nine, EnneagramType::One]
        );
    }

    #[test]
    fn probabilities_are_ratios() {
        let responses = vec![answer("s1_01", 3), answer("s1_11", 1)];
        let scores = Stage1Scorer::score(&type_map(), &responses);
        assert!((scores.probability(EnneagramType::One) - 0.75).abs() < 1e-12);
        assert!((scores.probability(EnneagramType::Three) - 0.25).abs() < 1e-12);
    }
}
