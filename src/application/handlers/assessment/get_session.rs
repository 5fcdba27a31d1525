//! GetSessionHandler - Query handler for a session snapshot.

use std::sync::Arc;

use crate::domain::enneagram::{AssessmentError, AssessmentSession};
use crate::domain::foundation::SessionId;
use crate::ports::AssessmentSessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving sessions.
pub struct GetSessionHandler {
    store: Arc<dyn AssessmentSessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn AssessmentSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<AssessmentSession, AssessmentError> {
        self.store
            .find(&query.session_id)
            .await?
            .ok_or(AssessmentError::SessionNotFound(query.session_id))
    }
}
