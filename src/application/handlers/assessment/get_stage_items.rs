//! GetStageItemsHandler - Query handler for the content of one stage.
//!
//! The discriminator stage is session-specific: its items come from a plan
//! derived once from the stored screener answers and then reused.

use std::sync::Arc;

use crate::domain::enneagram::{
    AssessmentError, AssessmentOrchestrator, AssessmentStage, DiscriminatorPlan, StageContent,
};
use crate::domain::foundation::{Locale, SessionId};
use crate::ports::AssessmentSessionStore;

/// Query for the items or prompts of a stage.
#[derive(Debug, Clone)]
pub struct GetStageItemsQuery {
    pub stage: String,
    pub locale: Option<String>,
    /// Required for the discriminator stage.
    pub session_id: Option<SessionId>,
}

/// Content of a stage, ready to present.
#[derive(Debug, Clone)]
pub struct StageItemsView {
    pub stage: AssessmentStage,
    pub locale: Locale,
    pub content: StageContent,
    /// The plan the discriminator items were drawn from.
    pub plan: Option<DiscriminatorPlan>,
}

/// Handler for stage content.
pub struct GetStageItemsHandler {
    store: Arc<dyn AssessmentSessionStore>,
    orchestrator: AssessmentOrchestrator,
}

impl GetStageItemsHandler {
    pub fn new(store: Arc<dyn AssessmentSessionStore>, orchestrator: AssessmentOrchestrator) -> Self {
        Self { store, orchestrator }
    }

    pub async fn handle(&self, query: GetStageItemsQuery) -> Result<StageItemsView, AssessmentError> {
        let stage: AssessmentStage = query.stage.parse()?;

        if stage != AssessmentStage::Discriminators {
            let locale = Locale::resolve_opt(query.locale.as_deref());
            let content = self.orchestrator.content_for(stage, locale, None)?;
            return Ok(StageItemsView {
                stage,
                locale,
                content,
                plan: None,
            });
        }

        let session_id = query.session_id.ok_or_else(|| {
            AssessmentError::invalid_input("sessionId", "required for the discriminators stage")
        })?;
        let session = self
            .store
            .find(&session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(session_id))?;

        if !session.has_screener_responses() {
            return Err(AssessmentError::ResponsesNotFound(session_id));
        }

        let plan = match session.plan() {
            Some(plan) => plan.clone(),
            None => {
                let derived = self
                    .orchestrator
                    .plan_discriminators(session.locale(), session.screener_responses());
                let plan = self.store.get_or_create_plan(&session_id, derived).await?;
                tracing::info!(
                    session_id = %session_id,
                    top_types = ?plan.top_types,
                    pairs = plan.pairs.len(),
                    items = plan.len(),
                    "Discriminator plan derived"
                );
                plan
            }
        };

        let locale = query
            .locale
            .as_deref()
            .map(Locale::resolve)
            .unwrap_or_else(|| session.locale());
        let content = self.orchestrator.content_for(stage, locale, Some(&plan))?;

        Ok(StageItemsView {
            stage,
            locale,
            content,
            plan: Some(plan),
        })
    }
}
