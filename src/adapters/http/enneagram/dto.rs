//! HTTP DTOs for assessment endpoints.
//!
//! Request and response bodies use camelCase field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{InterpretationView, StageItemsView, SubmitAnswersResult};
use crate::domain::enneagram::{
    AssessmentResult, AssessmentSession, AssessmentStage, DiscriminatorPlan, Item, SessionResponses,
    StageContent, StageProgress, TypeProfile,
};
use crate::domain::foundation::Locale;
use crate::ports::{Interpretation, NarrativeSource, StrengthsContext};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub locale: Option<String>,
}

/// Query parameters for stage items.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageItemsQuery {
    #[serde(default = "default_stage")]
    pub stage: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

fn default_stage() -> String {
    AssessmentStage::Screener.as_str().to_string()
}

/// Request to record answers for a stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub session_id: String,
    pub stage: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Request to score a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub session_id: String,
}

/// Request to interpret a session's result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretRequest {
    pub session_id: String,
    #[serde(default)]
    pub strengths: Option<StrengthsContext>,
    #[serde(default)]
    pub locale: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub locale: Locale,
    pub stage: AssessmentStage,
    pub responses: SessionResponses,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssessmentSession> for SessionResponse {
    fn from(session: AssessmentSession) -> Self {
        Self {
            id: session.id().to_string(),
            locale: session.locale(),
            stage: session.stage(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
            responses: session.responses().clone(),
        }
    }
}

/// Items or prompts for one stage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageItemsResponse {
    pub stage: AssessmentStage,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<DiscriminatorPlan>,
}

impl From<StageItemsView> for StageItemsResponse {
    fn from(view: StageItemsView) -> Self {
        let (items, prompts) = match view.content {
            StageContent::Items(items) => (Some(items), None),
            StageContent::Prompts(prompts) => (None, Some(prompts)),
        };
        Self {
            stage: view.stage,
            locale: view.locale,
            items,
            prompts,
            plan: view.plan,
        }
    }
}

/// Progress through a stage.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressResponse {
    pub answered: usize,
    pub required: usize,
    pub ratio: f64,
}

impl From<StageProgress> for ProgressResponse {
    fn from(progress: StageProgress) -> Self {
        Self {
            answered: progress.answered,
            required: progress.required,
            ratio: progress.ratio(),
        }
    }
}

/// Outcome of an answer submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersResponse {
    pub session_id: String,
    pub stage: AssessmentStage,
    pub next_stage: AssessmentStage,
    pub progress: ProgressResponse,
}

impl From<SubmitAnswersResult> for SubmitAnswersResponse {
    fn from(result: SubmitAnswersResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            stage: result.stage,
            next_stage: result.next_stage,
            progress: result.progress.into(),
        }
    }
}

/// Interpretation with the profile and result it describes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretResponse {
    pub session_id: String,
    pub result: AssessmentResult,
    pub interpretation: Interpretation,
    pub type_profile: &'static TypeProfile,
    pub source: NarrativeSource,
    pub locale: Locale,
    pub generated_at: String,
}

impl InterpretResponse {
    pub fn new(session_id: String, view: InterpretationView) -> Self {
        Self {
            session_id,
            result: view.result,
            interpretation: view.interpretation,
            type_profile: view.type_profile,
            source: view.source,
            locale: view.locale,
            generated_at: view.generated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
