//! StartSessionHandler - Command handler for opening an assessment session.

use std::sync::Arc;

use crate::domain::enneagram::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{Locale, SessionId};
use crate::ports::AssessmentSessionStore;

/// Command to start a new session.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    /// Requested locale code; unknown or missing codes fall back to English.
    pub locale: Option<String>,
}

/// Handler for starting sessions.
pub struct StartSessionHandler {
    store: Arc<dyn AssessmentSessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn AssessmentSessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<AssessmentSession, AssessmentError> {
        let locale = Locale::resolve_opt(cmd.locale.as_deref());
        let session = AssessmentSession::new(SessionId::new(), locale);

        self.store.create(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            locale = locale.code(),
            "Assessment session started"
        );

        Ok(session)
    }
}
