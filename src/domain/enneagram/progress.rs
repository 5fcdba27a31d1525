//! Stage completion tracking.

use serde::{Deserialize, Serialize};

use super::discriminator::{DiscriminatorPlan, DEFAULT_PLAN_LEN};
use super::item_bank::ItemBank;
use super::stage::AssessmentStage;

/// Reflection texts required to finish the narrative stage.
pub const NARRATIVE_TEXTS: usize = 2;

/// How far a respondent is through one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    pub answered: usize,
    pub required: usize,
}

impl StageProgress {
    pub fn new(answered: usize, required: usize) -> Self {
        Self { answered, required }
    }

    /// Answers needed to finish `stage`.
    ///
    /// The discriminator stage needs the stored plan's length, or
    /// `DEFAULT_PLAN_LEN` before a plan exists.
    pub fn required_for(stage: AssessmentStage, bank: &ItemBank, plan: Option<&DiscriminatorPlan>) -> usize {
        match stage {
            AssessmentStage::Screener => bank.screener_len(),
            AssessmentStage::Discriminators => plan
                .map(DiscriminatorPlan::len)
                .filter(|len| *len > 0)
                .unwrap_or(DEFAULT_PLAN_LEN),
            AssessmentStage::Wings => bank.instinct_len(),
            AssessmentStage::Narrative => NARRATIVE_TEXTS,
            AssessmentStage::Complete => 0,
        }
    }

    /// Fraction done, clamped to `[0, 1]`. Nothing required counts as done.
    pub fn ratio(&self) -> f64 {
        if self.required == 0 {
            return 1.0;
        }
        (self.answered as f64 / self.required as f64).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.answered >= self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::discriminator::PlanEntry;
    use crate::domain::enneagram::types::{DiscriminatorPair, EnneagramType};

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(StageProgress::new(3, 6).ratio(), 0.5);
        assert_eq!(StageProgress::new(9, 6).ratio(), 1.0);
        assert_eq!(StageProgress::new(0, 0).ratio(), 1.0);
    }

    #[test]
    fn completion_needs_all_required() {
        assert!(!StageProgress::new(44, 45).is_complete());
        assert!(StageProgress::new(45, 45).is_complete());
    }

    #[test]
    fn required_counts_per_stage() {
        let bank = ItemBank::load().unwrap();
        assert_eq!(StageProgress::required_for(AssessmentStage::Screener, &bank, None), 45);
        assert_eq!(StageProgress::required_for(AssessmentStage::Wings, &bank, None), 12);
        assert_eq!(StageProgress::required_for(AssessmentStage::Narrative, &bank, None), 2);
        assert_eq!(StageProgress::required_for(AssessmentStage::Complete, &bank, None), 0);
        assert_eq!(StageProgress::required_for(AssessmentStage::Discriminators, &bank, None), 6);
    }

    #[test]
    fn discriminator_requirement_follows_plan() {
        let bank = ItemBank::load().unwrap();
        let plan = DiscriminatorPlan {
            top_types: vec![EnneagramType::Seven],
            pairs: vec![DiscriminatorPair::ThreeSeven],
            entries: vec![
                PlanEntry {
                    item_id: "d_3vs7_01".into(),
                    pair: DiscriminatorPair::ThreeSeven,
                },
                PlanEntry {
                    item_id: "d_3vs7_02".into(),
                    pair: DiscriminatorPair::ThreeSeven,
                },
            ],
        };
        assert_eq!(
            StageProgress::required_for(AssessmentStage::Discriminators, &bank, Some(&plan)),
            2
        );
    }
}
