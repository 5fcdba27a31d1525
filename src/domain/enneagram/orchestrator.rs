//! Assessment Orchestrator - routes stages to items and composes the result.
//!
//! Pure composition over the item bank and scorers. Persistence of answers
//! and of the discriminator plan belongs to the caller.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::confidence::ConfidenceBand;
use super::discriminator::{DiscriminatorPlan, DiscriminatorSelector, DiscriminatorTally};
use super::errors::AssessmentError;
use super::instinct::{InstinctScorer, InstinctScores};
use super::item::Item;
use super::item_bank::ItemBank;
use super::response::LikertResponse;
use super::scoring::{ProbabilityDistribution, RawScores, Stage1Scorer, TypeScores};
use super::session::AssessmentSession;
use super::stage::AssessmentStage;
use super::types::{EnneagramType, Instinct};
use super::wing::WingEstimate;
use crate::domain::foundation::Locale;

/// Version tag of the exported result shape.
pub const RESULT_VERSION: &str = "1.0";

/// What a stage presents to the respondent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageContent {
    Items(Vec<Item>),
    Prompts(Vec<String>),
}

/// Exported classification for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    /// Final type after the discriminator round.
    pub primary_type: EnneagramType,
    /// Leading type from the screener alone.
    pub stage1_primary_type: EnneagramType,
    pub type_probabilities: ProbabilityDistribution,
    pub raw_scores: RawScores,
    pub confidence: ConfidenceBand,
    pub top_types: Vec<EnneagramType>,
    pub wing: EnneagramType,
    /// Wing label such as `4w5`.
    pub likely_wing: String,
    pub instinct_scores: Option<InstinctScores>,
    pub dominant_instinct: Option<Instinct>,
    pub discriminator_tally: DiscriminatorTally,
    pub version: String,
}

/// Stage router and result composer.
#[derive(Debug, Clone)]
pub struct AssessmentOrchestrator {
    bank: Arc<ItemBank>,
}

impl AssessmentOrchestrator {
    pub fn new(bank: Arc<ItemBank>) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &ItemBank {
        &self.bank
    }

    /// Content for a stage.
    ///
    /// The discriminator stage needs the session's plan; without one the
    /// caller has not derived it from screener answers yet.
    pub fn content_for(
        &self,
        stage: AssessmentStage,
        locale: Locale,
        plan: Option<&DiscriminatorPlan>,
    ) -> Result<StageContent, AssessmentError> {
        match stage {
            AssessmentStage::Screener => Ok(StageContent::Items(self.bank.screener_items(locale).to_vec())),
            AssessmentStage::Discriminators => {
                let plan = plan.ok_or_else(|| {
                    AssessmentError::invalid_input("sessionId", "discriminator plan has not been derived")
                })?;
                Ok(StageContent::Items(self.items_for_plan(locale, plan)))
            }
            AssessmentStage::Wings => Ok(StageContent::Items(self.bank.instinct_items(locale).to_vec())),
            AssessmentStage::Narrative => Ok(StageContent::Prompts(self.bank.narrative_prompts(locale).to_vec())),
            AssessmentStage::Complete => Err(AssessmentError::unsupported_stage(stage.as_str())),
        }
    }

    pub fn score_screener(&self, locale: Locale, responses: &[LikertResponse]) -> TypeScores {
        Stage1Scorer::score(self.bank.item_type_map(locale), responses)
    }

    /// Derives the discriminator plan from screener answers.
    pub fn plan_discriminators(&self, locale: Locale, screener: &[LikertResponse]) -> DiscriminatorPlan {
        let scores = self.score_screener(locale, screener);
        DiscriminatorSelector::build_plan(&self.bank, locale, &scores)
    }

    /// Resolves plan entries to items, in plan order.
    pub fn items_for_plan(&self, locale: Locale, plan: &DiscriminatorPlan) -> Vec<Item> {
        plan.item_ids()
            .filter_map(|id| self.bank.discriminator_item(locale, id))
            .cloned()
            .collect()
    }

    /// Computes the full result from a session's stored answers.
    ///
    /// # Errors
    /// - `ResponsesNotFound` when the session has no screener answers
    pub fn evaluate(&self, session: &AssessmentSession) -> Result<AssessmentResult, AssessmentError> {
        if !session.has_screener_responses() {
            return Err(AssessmentError::ResponsesNotFound(*session.id()));
        }
        let locale = session.locale();

        let scores = self.score_screener(locale, session.screener_responses());
        let confidence = ConfidenceBand::classify(&scores.probabilities);

        let tally = session
            .plan()
            .map(|plan| DiscriminatorSelector::tally(plan, session.discriminator_answers()))
            .unwrap_or_default();
        let primary = DiscriminatorSelector::narrow(&scores, confidence, &tally);
        let wing = WingEstimate::estimate(primary, &scores);

        let instinct_scores = if session.instinct_responses().is_empty() {
            None
        } else {
            Some(InstinctScorer::score(self.bank.instinct_map(locale), session.instinct_responses()))
        };

        Ok(AssessmentResult {
            primary_type: primary,
            stage1_primary_type: scores.primary_type(),
            top_types: scores.top(3),
            confidence,
            wing: wing.wing,
            likely_wing: wing.label(),
            dominant_instinct: instinct_scores.map(|s| s.dominant),
            instinct_scores,
            discriminator_tally: tally,
            type_probabilities: scores.probabilities,
            raw_scores: scores.raw,
            version: RESULT_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::response::{DiscriminatorAnswer, DiscriminatorChoice};
    use crate::domain::foundation::{Likert, SessionId};

    fn orchestrator() -> AssessmentOrchestrator {
        AssessmentOrchestrator::new(Arc::new(ItemBank::load().unwrap()))
    }

    fn all_screener(o: &AssessmentOrchestrator, value: Likert) -> Vec<LikertResponse> {
        o.bank()
            .screener_items(Locale::En)
            .iter()
            .map(|i| LikertResponse::new(i.id.clone(), value))
            .collect()
    }

    #[test]
    fn content_per_stage() {
        let o = orchestrator();
        match o.content_for(AssessmentStage::Screener, Locale::En, None).unwrap() {
            StageContent::Items(items) => assert_eq!(items.len(), 45),
            other => panic!("unexpected {:?}", other),
        }
        match o.content_for(AssessmentStage::Wings, Locale::Kr, None).unwrap() {
            StageContent::Items(items) => assert_eq!(items.len(), 12),
            other => panic!("unexpected {:?}", other),
        }
        match o.content_for(AssessmentStage::Narrative, Locale::En, None).unwrap() {
            StageContent::Prompts(prompts) => assert_eq!(prompts.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(o.content_for(AssessmentStage::Complete, Locale::En, None).is_err());
        assert!(o.content_for(AssessmentStage::Discriminators, Locale::En, None).is_err());
    }

    #[test]
    fn discriminator_content_follows_plan_order() {
        let o = orchestrator();
        let screener: Vec<_> = ["s1_16", "s1_17", "s1_41"]
            .iter()
            .map(|id| LikertResponse::new(*id, Likert::StronglyAgree))
            .collect();
        let plan = o.plan_discriminators(Locale::En, &screener);
        match o.content_for(AssessmentStage::Discriminators, Locale::Kr, Some(&plan)).unwrap() {
            StageContent::Items(items) => {
                let ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
                let planned: Vec<_> = plan.item_ids().map(String::from).collect();
                assert_eq!(ids, planned);
                assert!(items.iter().all(|i| i.locale == Locale::Kr));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn uniform_answers_give_low_confidence() {
        let o = orchestrator();
        let mut session = AssessmentSession::new(SessionId::new(), Locale::En);
        session.record_screener(&all_screener(&o, Likert::StronglyAgree));
        let result = o.evaluate(&session).unwrap();
        assert_eq!(result.confidence, ConfidenceBand::Low);
        assert_eq!(result.primary_type, EnneagramType::One);
        for p in result.type_probabilities.values() {
            assert!((p - 1.0 / 9.0).abs() < 1e-12);
        }
        assert_eq!(result.likely_wing, "1w2");
        assert_eq!(result.dominant_instinct, None);
        assert_eq!(result.version, "1.0");
    }

    #[test]
    fn evaluate_requires_screener_answers() {
        let o = orchestrator();
        let session = AssessmentSession::new(SessionId::new(), Locale::En);
        assert!(matches!(o.evaluate(&session), Err(AssessmentError::ResponsesNotFound(_))));
    }

    #[test]
    fn discriminators_narrow_an_ambiguous_result() {
        let o = orchestrator();
        let mut session = AssessmentSession::new(SessionId::new(), Locale::En);
        // Four and Nine tie at the top, Two trails.
        let screener: Vec<_> = ["s1_16", "s1_17", "s1_41", "s1_42", "s1_06"]
            .iter()
            .map(|id| LikertResponse::new(*id, Likert::StronglyAgree))
            .collect();
        session.record_screener(&screener);
        let plan = o.plan_discriminators(Locale::En, &screener);
        session.attach_plan(plan);
        session.record_discriminators(&[
            DiscriminatorAnswer::new("d_4vs9_01", DiscriminatorChoice::B),
            DiscriminatorAnswer::new("d_4vs9_02", DiscriminatorChoice::B),
        ]);

        let result = o.evaluate(&session).unwrap();
        assert_eq!(result.stage1_primary_type, EnneagramType::Four);
        assert_eq!(result.confidence, ConfidenceBand::Low);
        assert_eq!(result.primary_type, EnneagramType::Nine);
        assert_eq!(result.discriminator_tally.get(&EnneagramType::Nine), Some(&2));
    }

    #[test]
    fn instinct_answers_fill_dominant_instinct() {
        let o = orchestrator();
        let mut session = AssessmentSession::new(SessionId::new(), Locale::En);
        session.record_screener(&all_screener(&o, Likert::Neutral));
        session.record_instincts(&[
            LikertResponse::new("i_03", Likert::StronglyAgree),
            LikertResponse::new("i_01", Likert::Disagree),
        ]);
        let result = o.evaluate(&session).unwrap();
        assert_eq!(result.dominant_instinct, Some(Instinct::Sx));
        assert_eq!(result.instinct_scores.unwrap().sx, 5);
    }

    #[test]
    fn result_serializes_camel_case_with_string_type_keys() {
        let o = orchestrator();
        let mut session = AssessmentSession::new(SessionId::new(), Locale::En);
        session.record_screener(&[LikertResponse::new("s1_01", Likert::StronglyAgree)]);
        let json = serde_json::to_value(o.evaluate(&session).unwrap()).unwrap();
        assert_eq!(json["primaryType"], "1");
        assert_eq!(json["typeProbabilities"]["1"], 1.0);
        assert_eq!(json["rawScores"]["1"], 5);
        assert_eq!(json["confidence"], "high");
        assert!(json["dominantInstinct"].is_null());
    }
}
