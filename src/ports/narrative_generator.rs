//! Narrative Generator Port - Prose interpretation of a result.
//!
//! Classification never depends on this port. Generators only turn a finished
//! `AssessmentResult` into readable text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::enneagram::{AssessmentError, AssessmentResult, EnneagramType, Instinct};
use crate::domain::foundation::Locale;

/// Strengths discovered elsewhere, used for the synergy section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthsContext {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub attitudes: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl StrengthsContext {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.attitudes.is_empty() && self.values.is_empty()
    }

    /// Up to `n` strengths, skills first.
    pub fn leading(&self, n: usize) -> Vec<&str> {
        self.skills
            .iter()
            .chain(&self.attitudes)
            .chain(&self.values)
            .map(String::as_str)
            .take(n)
            .collect()
    }
}

/// Input for one interpretation.
#[derive(Debug, Clone)]
pub struct NarrativeRequest {
    pub primary_type: EnneagramType,
    pub wing: EnneagramType,
    pub instinct: Instinct,
    pub confidence: String,
    pub strengths: Option<StrengthsContext>,
    pub locale: Locale,
}

impl NarrativeRequest {
    /// Builds a request from a result. A missing instinct reads as `sp`.
    pub fn from_result(result: &AssessmentResult, strengths: Option<StrengthsContext>, locale: Locale) -> Self {
        Self {
            primary_type: result.primary_type,
            wing: result.wing,
            instinct: result.dominant_instinct.unwrap_or(Instinct::Sp),
            confidence: result.confidence.to_string(),
            strengths,
            locale,
        }
    }
}

/// Generated interpretation sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub type_overview: String,
    pub wing_influence: String,
    pub instinct_focus: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths_synergy: Option<String>,
    pub growth_path: String,
    pub career_insights: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrated_insight: Option<String>,
}

/// Which generator produced an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeSource {
    Ai,
    Fallback,
}

/// An interpretation with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedNarrative {
    pub interpretation: Interpretation,
    pub source: NarrativeSource,
}

/// Errors from narrative generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NarrativeError {
    #[error("Narrative generator not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Could not parse generated narrative: {0}")]
    Parse(String),
}

impl NarrativeError {
    /// Worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            NarrativeError::Network(_) => true,
            NarrativeError::Provider { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<NarrativeError> for AssessmentError {
    fn from(err: NarrativeError) -> Self {
        AssessmentError::NarrativeUnavailable(err.to_string())
    }
}

/// Port for narrative generators.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &NarrativeRequest) -> Result<GeneratedNarrative, NarrativeError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
