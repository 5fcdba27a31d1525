//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `LIFECRAFT` prefix and
//! `__` between nested keys. Every section has defaults, so the service
//! starts with no environment at all.
//!
//! # Example
//!
//! ```no_run
//! use lifecraft_enneagram::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod features;
mod narrative;
mod server;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use narrative::{NarrativeConfig, MAX_NARRATIVE_RETRIES};
pub use server::{LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Narrative generator configuration (Anthropic)
    #[serde(default)]
    pub narrative: NarrativeConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LIFECRAFT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LIFECRAFT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LIFECRAFT__NARRATIVE__ANTHROPIC_API_KEY=...` -> `narrative.anthropic_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIFECRAFT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.narrative.validate()?;
        Ok(())
    }

    /// True when interpretations should go through the AI generator
    pub fn use_ai_narrative(&self) -> bool {
        self.features.enable_ai_narrative && self.narrative.has_anthropic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "LIFECRAFT__SERVER__PORT",
        "LIFECRAFT__SERVER__LOG_FORMAT",
        "LIFECRAFT__NARRATIVE__ANTHROPIC_API_KEY",
        "LIFECRAFT__FEATURES__ENABLE_AI_NARRATIVE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_loads_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
        assert!(!config.use_ai_narrative());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIFECRAFT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }

    #[test]
    fn test_json_log_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIFECRAFT__SERVER__LOG_FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().server.json_logs());
    }

    #[test]
    fn test_ai_narrative_needs_usable_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("LIFECRAFT__NARRATIVE__ANTHROPIC_API_KEY", "sk-ant-api03-0123456789");
        let config = AppConfig::load().unwrap();
        assert!(config.use_ai_narrative());

        env::set_var("LIFECRAFT__FEATURES__ENABLE_AI_NARRATIVE", "false");
        let config = AppConfig::load().unwrap();
        clear_env();
        assert!(!config.use_ai_narrative());
    }
}
