//! Assessment stage pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Stages of one assessment, in the order a respondent goes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStage {
    #[default]
    Screener,
    Discriminators,
    /// Instinct items; named after the wing/instinct step of the questionnaire.
    Wings,
    Narrative,
    Complete,
}

impl AssessmentStage {
    pub const ALL: [AssessmentStage; 5] = [
        AssessmentStage::Screener,
        AssessmentStage::Discriminators,
        AssessmentStage::Wings,
        AssessmentStage::Narrative,
        AssessmentStage::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStage::Screener => "screener",
            AssessmentStage::Discriminators => "discriminators",
            AssessmentStage::Wings => "wings",
            AssessmentStage::Narrative => "narrative",
            AssessmentStage::Complete => "complete",
        }
    }

    /// Stage that follows this one. `Complete` maps to itself.
    pub fn next(&self) -> Self {
        match self {
            AssessmentStage::Screener => AssessmentStage::Discriminators,
            AssessmentStage::Discriminators => AssessmentStage::Wings,
            AssessmentStage::Wings => AssessmentStage::Narrative,
            AssessmentStage::Narrative | AssessmentStage::Complete => AssessmentStage::Complete,
        }
    }

    /// True for stages that serve items or prompts.
    pub fn has_content(&self) -> bool {
        !matches!(self, AssessmentStage::Complete)
    }
}

impl StateMachine for AssessmentStage {
    /// Stages only move forward; skipping ahead is allowed.
    fn can_transition_to(&self, target: &Self) -> bool {
        target > self
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.iter().copied().filter(|s| s > self).collect()
    }
}

impl fmt::Display for AssessmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssessmentStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("stage", format!("unsupported stage '{}'", s)))
    }
}
