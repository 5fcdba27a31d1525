//! Assessment session aggregate.
//!
//! A session holds raw answers only. Scores are always recomputed from these
//! answers; nothing derived is stored except the discriminator plan, which is
//! fixed once per session.

use serde::{Deserialize, Serialize};

use super::discriminator::DiscriminatorPlan;
use super::response::{merge_by_id, DiscriminatorAnswer, LikertResponse};
use super::stage::AssessmentStage;
use crate::domain::foundation::{Locale, SessionId, StateMachine, Timestamp};

/// Raw answers grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponses {
    pub screener: Vec<LikertResponse>,
    pub discriminators: Vec<DiscriminatorAnswer>,
    pub instincts: Vec<LikertResponse>,
    pub texts: Vec<String>,
    #[serde(rename = "stage2Plan", skip_serializing_if = "Option::is_none")]
    pub stage2_plan: Option<DiscriminatorPlan>,
}

/// One respondent's run through the questionnaire.
///
/// # Invariants
///
/// - `stage` never moves backwards
/// - `stage2_plan` is written at most once
/// - answers hold at most one entry per item id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSession {
    id: SessionId,
    locale: Locale,
    stage: AssessmentStage,
    responses: SessionResponses,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl AssessmentSession {
    /// Starts a session at the screener stage.
    pub fn new(id: SessionId, locale: Locale) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            locale,
            stage: AssessmentStage::Screener,
            responses: SessionResponses::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        locale: Locale,
        stage: AssessmentStage,
        responses: SessionResponses,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            locale,
            stage,
            responses,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn stage(&self) -> AssessmentStage {
        self.stage
    }

    pub fn responses(&self) -> &SessionResponses {
        &self.responses
    }

    pub fn screener_responses(&self) -> &[LikertResponse] {
        &self.responses.screener
    }

    pub fn discriminator_answers(&self) -> &[DiscriminatorAnswer] {
        &self.responses.discriminators
    }

    pub fn instinct_responses(&self) -> &[LikertResponse] {
        &self.responses.instincts
    }

    pub fn texts(&self) -> &[String] {
        &self.responses.texts
    }

    pub fn plan(&self) -> Option<&DiscriminatorPlan> {
        self.responses.stage2_plan.as_ref()
    }

    pub fn has_screener_responses(&self) -> bool {
        !self.responses.screener.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == AssessmentStage::Complete
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Recording
    // ─────────────────────────────────────────────────────────────────────────

    pub fn record_screener(&mut self, responses: &[LikertResponse]) {
        merge_by_id(&mut self.responses.screener, responses);
        self.touch();
    }

    pub fn record_discriminators(&mut self, answers: &[DiscriminatorAnswer]) {
        merge_by_id(&mut self.responses.discriminators, answers);
        self.touch();
    }

    pub fn record_instincts(&mut self, responses: &[LikertResponse]) {
        merge_by_id(&mut self.responses.instincts, responses);
        self.touch();
    }

    /// Replaces the reflection texts. Empty submissions keep the old texts.
    pub fn record_texts(&mut self, texts: Vec<String>) {
        if texts.is_empty() {
            return;
        }
        self.responses.texts = texts;
        self.touch();
    }

    /// Stores the plan unless one exists, returning the plan in effect.
    pub fn attach_plan(&mut self, plan: DiscriminatorPlan) -> &DiscriminatorPlan {
        if self.responses.stage2_plan.is_none() {
            self.touch();
        }
        self.responses.stage2_plan.get_or_insert(plan)
    }

    /// Moves to the stage after `finished` if that is a forward move.
    ///
    /// Returns true when the stage changed.
    pub fn advance_past(&mut self, finished: AssessmentStage) -> bool {
        match self.stage.transition_to(finished.next()) {
            Ok(next) => {
                self.stage = next;
                self.touch();
                true
            }
            Err(_) => false,
        }
    }

    /// Switches the locale used for items and prompts.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
