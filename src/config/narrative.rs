//! Narrative generator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::narrative::is_usable_api_key;

/// Upper bound on retries per interpretation.
pub const MAX_NARRATIVE_RETRIES: u32 = 5;

/// Narrative generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeConfig {
    /// Anthropic API key; missing or placeholder keys select the template generator
    pub anthropic_api_key: Option<String>,

    /// Model used for interpretations
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl NarrativeConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a usable Anthropic key is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_deref().is_some_and(is_usable_api_key)
    }

    /// Validate narrative configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidNarrativeTimeout);
        }
        if self.max_retries > MAX_NARRATIVE_RETRIES {
            return Err(ValidationError::TooManyRetries {
                max: MAX_NARRATIVE_RETRIES,
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}
