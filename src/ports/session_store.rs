//! Session Store Port - Persistence for assessment sessions.
//!
//! The store keeps raw answers and the discriminator plan. Derived scores are
//! never stored; callers recompute them from the answers.

use async_trait::async_trait;

use crate::domain::enneagram::{AssessmentError, AssessmentSession, DiscriminatorPlan};
use crate::domain::foundation::SessionId;

/// Errors from session storage.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<SessionStoreError> for AssessmentError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound(id) => AssessmentError::SessionNotFound(id),
            other => AssessmentError::storage(other.to_string()),
        }
    }
}

/// Port for storing assessment sessions.
#[async_trait]
pub trait AssessmentSessionStore: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the id is taken.
    async fn create(&self, session: &AssessmentSession) -> Result<(), SessionStoreError>;

    /// Loads a session, `None` if unknown.
    async fn find(&self, id: &SessionId) -> Result<Option<AssessmentSession>, SessionStoreError>;

    /// Overwrites an existing session.
    ///
    /// A stored discriminator plan is kept even if `session` carries none or a
    /// different one.
    ///
    /// # Errors
    /// Returns `NotFound` if the session was never created.
    async fn save(&self, session: &AssessmentSession) -> Result<(), SessionStoreError>;

    /// Returns the stored plan, or stores `plan` and returns it.
    ///
    /// Check and insert happen atomically, so concurrent first calls for the
    /// same session all observe one plan.
    async fn get_or_create_plan(
        &self,
        id: &SessionId,
        plan: DiscriminatorPlan,
    ) -> Result<DiscriminatorPlan, SessionStoreError>;
}
