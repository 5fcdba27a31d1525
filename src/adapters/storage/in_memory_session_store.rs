//! In-Memory Session Store Adapter
//!
//! Keeps assessment sessions in a process-local map. Sessions are lost on
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::enneagram::{AssessmentSession, DiscriminatorPlan};
use crate::domain::foundation::SessionId;
use crate::ports::{AssessmentSessionStore, SessionStoreError};

/// In-memory storage for assessment sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, AssessmentSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssessmentSessionStore for InMemorySessionStore {
    async fn create(&self, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(session.id()) {
            return Err(SessionStoreError::AlreadyExists(*session.id()));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<AssessmentSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save(&self, session: &AssessmentSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(session.id())
            .ok_or(SessionStoreError::NotFound(*session.id()))?;

        *stored = match stored.plan() {
            Some(plan) => pin_plan(session, plan.clone()),
            None => session.clone(),
        };
        Ok(())
    }

    async fn get_or_create_plan(
        &self,
        id: &SessionId,
        plan: DiscriminatorPlan,
    ) -> Result<DiscriminatorPlan, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id).ok_or(SessionStoreError::NotFound(*id))?;
        Ok(session.attach_plan(plan).clone())
    }
}

/// Replaces whatever plan `session` carries with `plan`.
fn pin_plan(session: &AssessmentSession, plan: DiscriminatorPlan) -> AssessmentSession {
    let mut responses = session.responses().clone();
    responses.stage2_plan = Some(plan);
    AssessmentSession::reconstitute(
        *session.id(),
        session.locale(),
        session.stage(),
        responses,
        *session.created_at(),
        *session.updated_at(),
    )
}
