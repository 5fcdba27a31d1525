//! InterpretResultHandler - Command handler producing a prose interpretation.
//!
//! The classification is computed first. The narrative generator only
//! decorates it and has no influence on the result.

use std::sync::Arc;

use crate::domain::enneagram::{
    AssessmentError, AssessmentOrchestrator, AssessmentResult, TypeProfile,
};
use crate::domain::foundation::{Locale, SessionId, Timestamp};
use crate::ports::{
    AssessmentSessionStore, Interpretation, NarrativeGenerator, NarrativeRequest, NarrativeSource,
    StrengthsContext,
};

/// Command to interpret a session's result.
#[derive(Debug, Clone)]
pub struct InterpretResultCommand {
    pub session_id: SessionId,
    pub strengths: Option<StrengthsContext>,
    /// Overrides the session locale for this interpretation only.
    pub locale: Option<String>,
}

/// Interpretation with the result it describes.
#[derive(Debug, Clone)]
pub struct InterpretationView {
    pub result: AssessmentResult,
    pub interpretation: Interpretation,
    pub type_profile: &'static TypeProfile,
    pub source: NarrativeSource,
    pub locale: Locale,
    pub generated_at: Timestamp,
}

/// Handler for interpretations.
pub struct InterpretResultHandler {
    store: Arc<dyn AssessmentSessionStore>,
    orchestrator: AssessmentOrchestrator,
    generator: Arc<dyn NarrativeGenerator>,
}

impl InterpretResultHandler {
    pub fn new(
        store: Arc<dyn AssessmentSessionStore>,
        orchestrator: AssessmentOrchestrator,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Self {
        Self {
            store,
            orchestrator,
            generator,
        }
    }

    pub async fn handle(&self, cmd: InterpretResultCommand) -> Result<InterpretationView, AssessmentError> {
        let session = self
            .store
            .find(&cmd.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(cmd.session_id))?;

        let result = self.orchestrator.evaluate(&session)?;
        let locale = cmd
            .locale
            .as_deref()
            .map(Locale::resolve)
            .unwrap_or_else(|| session.locale());
        let strengths = cmd.strengths.filter(|s| !s.is_empty());

        let request = NarrativeRequest::from_result(&result, strengths, locale);
        let narrative = self.generator.generate(&request).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            generator = self.generator.name(),
            source = ?narrative.source,
            locale = locale.code(),
            "Interpretation generated"
        );

        Ok(InterpretationView {
            type_profile: TypeProfile::for_type(result.primary_type),
            result,
            interpretation: narrative.interpretation,
            source: narrative.source,
            locale,
            generated_at: Timestamp::now(),
        })
    }
}
