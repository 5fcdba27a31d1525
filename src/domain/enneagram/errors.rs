//! Assessment error types.

use thiserror::Error;

use super::progress::StageProgress;
use super::stage::AssessmentStage;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors surfaced to callers of the assessment operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// Request is missing a field or carries an unusable value.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Stage name is unknown or has no content.
    #[error("Unsupported stage: {0}")]
    UnsupportedStage(String),

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Screener answers are required but none are stored.
    #[error("Screener responses not found for session {0}")]
    ResponsesNotFound(SessionId),

    /// A stage that must be answered in full was submitted partially.
    #[error("Please answer all {} questions before proceeding ({} answered)", .progress.required, .progress.answered)]
    IncompleteStage {
        stage: AssessmentStage,
        progress: StageProgress,
    },

    /// Session store failed.
    #[error("Storage unavailable: {0}")]
    Storage(String),

    /// Narrative generator failed or is misconfigured.
    #[error("Narrative generator unavailable: {0}")]
    NarrativeUnavailable(String),
}

impl AssessmentError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        AssessmentError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_stage(stage: impl Into<String>) -> Self {
        AssessmentError::UnsupportedStage(stage.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        AssessmentError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            AssessmentError::UnsupportedStage(_) => ErrorCode::UnsupportedStage,
            AssessmentError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            AssessmentError::ResponsesNotFound(_) => ErrorCode::ResponsesNotFound,
            AssessmentError::IncompleteStage { .. } => ErrorCode::IncompleteStage,
            AssessmentError::Storage(_) => ErrorCode::StorageUnavailable,
            AssessmentError::NarrativeUnavailable(_) => ErrorCode::NarrativeUnavailable,
        }
    }
}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        match err {
            ValidationError::InvalidFormat { field, reason } if field == "stage" => {
                AssessmentError::UnsupportedStage(reason)
            }
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => AssessmentError::invalid_input(field, message),
        }
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
