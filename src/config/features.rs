//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Use the AI narrative generator when a usable key is configured
    #[serde(default = "default_true")]
    pub enable_ai_narrative: bool,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_ai_narrative: true,
            enable_tracing: true,
        }
    }
}

fn default_true() -> bool {
    true
}
