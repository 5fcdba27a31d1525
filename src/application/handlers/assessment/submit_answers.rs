//! SubmitAnswersHandler - Command handler for recording answers to a stage.
//!
//! # Stage rules
//!
//! | Stage | Input key | Complete when |
//! |-------|-----------|---------------|
//! | screener | `items` | all screener items answered in one submission |
//! | discriminators | `answers` | every planned item answered |
//! | wings | `items` | every instinct item answered |
//! | narrative | `texts` | two reflections stored |
//!
//! Duplicate ids keep their first answer and ids outside the stage are
//! ignored. Discriminator answers need screener answers: the plan is derived
//! here when the items were never fetched. Completing a stage moves the
//! session past it. Stages never move back.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::enneagram::{
    known_entries, parse_discriminator_entries, parse_likert_entries, parse_texts, AssessmentError,
    AssessmentOrchestrator, AssessmentSession, AssessmentStage, StageProgress, NARRATIVE_TEXTS,
};
use crate::domain::foundation::{Locale, SessionId};
use crate::ports::AssessmentSessionStore;

/// Command to record answers for one stage.
#[derive(Debug, Clone)]
pub struct SubmitAnswersCommand {
    pub session_id: SessionId,
    pub stage: String,
    /// Stage-specific payload, see the module docs.
    pub input: Value,
    pub locale: Option<String>,
}

/// Outcome of a submission.
#[derive(Debug, Clone)]
pub struct SubmitAnswersResult {
    pub session_id: SessionId,
    pub stage: AssessmentStage,
    /// Stage the session is at after this submission.
    pub next_stage: AssessmentStage,
    pub progress: StageProgress,
}

/// Handler for answer submissions.
pub struct SubmitAnswersHandler {
    store: Arc<dyn AssessmentSessionStore>,
    orchestrator: AssessmentOrchestrator,
}

impl SubmitAnswersHandler {
    pub fn new(store: Arc<dyn AssessmentSessionStore>, orchestrator: AssessmentOrchestrator) -> Self {
        Self { store, orchestrator }
    }

    pub async fn handle(&self, cmd: SubmitAnswersCommand) -> Result<SubmitAnswersResult, AssessmentError> {
        let stage: AssessmentStage = cmd.stage.parse()?;
        if !cmd.input.is_object() && stage != AssessmentStage::Complete {
            return Err(AssessmentError::invalid_input("input", "must be an object"));
        }

        let mut session = self
            .store
            .find(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(cmd.session_id))?;

        if let Some(code) = cmd.locale.as_deref() {
            session.set_locale(Locale::resolve(code));
        }

        if stage == AssessmentStage::Discriminators {
            self.ensure_plan(&mut session).await?;
        }

        let progress = self.record(&mut session, stage, &cmd.input)?;
        let advanced = progress.is_complete() && session.advance_past(stage);

        self.store.save(&session).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            stage = stage.as_str(),
            answered = progress.answered,
            required = progress.required,
            advanced,
            "Answers recorded"
        );

        Ok(SubmitAnswersResult {
            session_id: cmd.session_id,
            stage,
            next_stage: session.stage(),
            progress,
        })
    }

    /// Attaches the session's discriminator plan, deriving it if needed.
    ///
    /// # Errors
    /// - `ResponsesNotFound` when the session has no screener answers
    async fn ensure_plan(&self, session: &mut AssessmentSession) -> Result<(), AssessmentError> {
        if session.plan().is_some() {
            return Ok(());
        }
        if !session.has_screener_responses() {
            return Err(AssessmentError::ResponsesNotFound(*session.id()));
        }

        let derived = self
            .orchestrator
            .plan_discriminators(session.locale(), session.screener_responses());
        let plan = self.store.get_or_create_plan(session.id(), derived).await?;
        tracing::info!(
            session_id = %session.id(),
            pairs = plan.pairs.len(),
            items = plan.len(),
            "Discriminator plan derived on submission"
        );
        session.attach_plan(plan);
        Ok(())
    }

    /// Applies the submission to `session` and returns the stage progress.
    fn record(
        &self,
        session: &mut AssessmentSession,
        stage: AssessmentStage,
        input: &Value,
    ) -> Result<StageProgress, AssessmentError> {
        let bank = self.orchestrator.bank();
        let required = StageProgress::required_for(stage, bank, session.plan());

        let answered = match stage {
            AssessmentStage::Screener => {
                let known = bank.item_type_map(session.locale());
                let entries = known_entries(
                    parse_likert_entries(input.get("items")),
                    |id| known.contains_key(id),
                    required,
                );

                let progress = StageProgress::new(entries.len(), required);
                if !progress.is_complete() {
                    return Err(AssessmentError::IncompleteStage { stage, progress });
                }
                session.record_screener(&entries);
                entries.len()
            }
            AssessmentStage::Discriminators => {
                let plan = session
                    .plan()
                    .ok_or(AssessmentError::ResponsesNotFound(*session.id()))?;
                let answers = known_entries(
                    parse_discriminator_entries(input.get("answers")),
                    |id| plan.pair_for(id).is_some(),
                    required,
                );
                session.record_discriminators(&answers);
                session.discriminator_answers().len()
            }
            AssessmentStage::Wings => {
                let instincts = bank.instinct_map(session.locale());
                let entries = known_entries(
                    parse_likert_entries(input.get("items")),
                    |id| instincts.contains_key(id),
                    required,
                );
                session.record_instincts(&entries);
                session.instinct_responses().len()
            }
            AssessmentStage::Narrative => {
                session.record_texts(parse_texts(input.get("texts"), NARRATIVE_TEXTS));
                session.texts().len()
            }
            AssessmentStage::Complete => 0,
        };

        Ok(StageProgress::new(answered, required))
    }
}
