//! ScoreAssessmentHandler - Query handler computing the result of a session.
//!
//! Scores are recomputed from the stored answers on every call.

use std::sync::Arc;

use crate::domain::enneagram::{AssessmentError, AssessmentOrchestrator, AssessmentResult};
use crate::domain::foundation::SessionId;
use crate::ports::AssessmentSessionStore;

/// Query to score a session.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentQuery {
    pub session_id: SessionId,
}

/// Handler for scoring sessions.
pub struct ScoreAssessmentHandler {
    store: Arc<dyn AssessmentSessionStore>,
    orchestrator: AssessmentOrchestrator,
}

impl ScoreAssessmentHandler {
    pub fn new(store: Arc<dyn AssessmentSessionStore>, orchestrator: AssessmentOrchestrator) -> Self {
        Self { store, orchestrator }
    }

    pub async fn handle(&self, query: ScoreAssessmentQuery) -> Result<AssessmentResult, AssessmentError> {
        let session = self
            .store
            .find(&query.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(query.session_id))?;

        let result = self.orchestrator.evaluate(&session)?;

        tracing::info!(
            session_id = %query.session_id,
            primary_type = %result.primary_type,
            stage1_primary_type = %result.stage1_primary_type,
            confidence = %result.confidence,
            wing = %result.likely_wing,
            "Assessment scored"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::enneagram::{AssessmentSession, ConfidenceBand, EnneagramType, ItemBank, LikertResponse};
    use crate::domain::foundation::{Likert, Locale};

    fn handler(store: Arc<InMemorySessionStore>) -> ScoreAssessmentHandler {
        ScoreAssessmentHandler::new(store, AssessmentOrchestrator::new(Arc::new(ItemBank::load().unwrap())))
    }

    #[tokio::test]
    async fn scores_stored_answers() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = AssessmentSession::new(SessionId::new(), Locale::En);
        session.record_screener(
            &["s1_01", "s1_02", "s1_03", "s1_04", "s1_05"]
                .map(|id| LikertResponse::new(id, Likert::StronglyAgree)),
        );
        store.create(&session).await.unwrap();

        let result = handler(store)
            .handle(ScoreAssessmentQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(result.primary_type, EnneagramType::One);
        assert_eq!(result.raw_scores.get(&EnneagramType::One), Some(&25));
        assert_eq!(result.confidence, ConfidenceBand::High);
    }

    #[tokio::test]
    async fn session_without_screener_has_no_result() {
        let store = Arc::new(InMemorySessionStore::new());
        let session = AssessmentSession::new(SessionId::new(), Locale::En);
        store.create(&session).await.unwrap();

        let result = handler(store)
            .handle(ScoreAssessmentQuery {
                session_id: *session.id(),
            })
            .await;
        assert!(matches!(result, Err(AssessmentError::ResponsesNotFound(_))));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let result = handler(Arc::new(InMemorySessionStore::new()))
            .handle(ScoreAssessmentQuery {
                session_id: SessionId::new(),
            })
            .await;
        assert!(matches!(result, Err(AssessmentError::SessionNotFound(_))));
    }
}
