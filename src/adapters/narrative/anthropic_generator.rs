//! Anthropic Narrative Generator - Interpretations from the Messages API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicNarrativeConfig::new(api_key)
//!     .with_model("claude-3-haiku-20240307")
//!     .with_max_retries(2);
//!
//! let generator = AnthropicNarrativeGenerator::new(config)?;
//! ```
//!
//! The model is asked for a bare JSON object with the interpretation keys.
//! Answers wrapped in a fenced code block are accepted too.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::enneagram::TypeProfile;
use crate::domain::foundation::Locale;
use crate::ports::{
    GeneratedNarrative, Interpretation, NarrativeError, NarrativeGenerator, NarrativeRequest,
    NarrativeSource,
};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Placeholder shipped in sample env files.
const PLACEHOLDER_KEY: &str = "your_anthropic_api_key_here";

/// Shortest key that is treated as real.
const MIN_KEY_LEN: usize = 10;

const MAX_TOKENS: u32 = 1536;
const TEMPERATURE: f32 = 0.7;

/// True when `key` looks like a real API key.
pub fn is_usable_api_key(key: &str) -> bool {
    let key = key.trim();
    key != PLACEHOLDER_KEY && key.len() >= MIN_KEY_LEN
}

/// Configuration for the Anthropic generator.
#[derive(Debug, Clone)]
pub struct AnthropicNarrativeConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl AnthropicNarrativeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-3-haiku-20240307".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Narrative generator backed by Anthropic's Messages API.
pub struct AnthropicNarrativeGenerator {
    config: AnthropicNarrativeConfig,
    client: Client,
}

impl AnthropicNarrativeGenerator {
    /// Creates the generator.
    ///
    /// # Errors
    /// `NotConfigured` when the key is missing or a placeholder, or the HTTP
    /// client cannot be built.
    pub fn new(config: AnthropicNarrativeConfig) -> Result<Self, NarrativeError> {
        if !is_usable_api_key(config.api_key()) {
            return Err(NarrativeError::NotConfigured(
                "Anthropic API key is missing or a placeholder".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NarrativeError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    async fn send(&self, body: &MessagesRequest) -> Result<Response, NarrativeError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NarrativeError::Network(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    NarrativeError::Network(e.to_string())
                }
            })
    }

    async fn read(&self, response: Response) -> Result<Interpretation, NarrativeError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::Parse(format!("Failed to parse response: {}", e)))?;

        let text = parsed
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        parse_interpretation(&text)
    }

    async fn attempt(&self, body: &MessagesRequest) -> Result<Interpretation, NarrativeError> {
        let response = self.send(body).await?;
        self.read(response).await
    }
}

#[async_trait]
impl NarrativeGenerator for AnthropicNarrativeGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<GeneratedNarrative, NarrativeError> {
        let body = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![MessageBody {
                role: "user".to_string(),
                content: build_prompt(request),
            }],
        };

        let mut retry_count = 0;
        loop {
            match self.attempt(&body).await {
                Ok(interpretation) => {
                    return Ok(GeneratedNarrative {
                        interpretation,
                        source: NarrativeSource::Ai,
                    })
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    tracing::warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        "Narrative request failed, retrying"
                    );
                    // Exponential backoff: 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << retry_count)).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Prompt and response shape
// ════════════════════════════════════════════════════════════════════════════════

/// Builds the user prompt for one interpretation.
pub fn build_prompt(request: &NarrativeRequest) -> String {
    let locale = request.locale;
    let en = Locale::En;
    let profile = TypeProfile::for_type(request.primary_type);
    let language = match locale {
        Locale::En => "Respond in English.",
        Locale::Kr => "Respond entirely in Korean (한국어로 응답하세요).",
    };

    let strengths = request
        .strengths
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let list = |v: &[String]| {
                if v.is_empty() {
                    "None identified".to_string()
                } else {
                    v.join(", ")
                }
            };
            format!(
                "\n## User's Discovered Strengths:\n- Skills: {}\n- Attitudes: {}\n- Values: {}\n",
                list(&s.skills),
                list(&s.attitudes),
                list(&s.values)
            )
        });

    let synergy_keys = if strengths.is_some() {
        "  \"strengthsSynergy\": \"2-3 sentences on how their strengths complement their type\",\n  \"integratedInsight\": \"4-6 sentences synthesising type, strengths and values\",\n"
    } else {
        ""
    };

    format!(
        "You are an expert Enneagram coach and career advisor.\n\n{language}\n\n\
## User's Enneagram Profile:\n\
- Primary Type: Type {t} - {name} ({nickname})\n\
- Wing: {w} ({t}w{w})\n\
- Dominant Instinct: {instinct}\n\
- Confidence Level: {confidence}\n\n\
## Core Motivation:\n{motivation}\n{strengths}\n\
Return a JSON object with EXACTLY these keys:\n{{\n\
  \"typeOverview\": \"2-3 sentences\",\n\
  \"wingInfluence\": \"1-2 sentences\",\n\
  \"instinctFocus\": \"1-2 sentences\",\n\
{synergy_keys}\
  \"growthPath\": \"2-3 sentences on moving toward Type {growth}\",\n\
  \"careerInsights\": \"2-3 sentences\"\n}}\n\n\
Return ONLY the JSON object, no markdown formatting or additional text.",
        language = language,
        t = request.primary_type,
        w = request.wing,
        name = profile.name.get(locale),
        nickname = profile.nickname.get(locale),
        instinct = request.instinct.display_name(en),
        confidence = request.confidence,
        motivation = profile.core_motivation.get(locale),
        strengths = strengths.unwrap_or_default(),
        synergy_keys = synergy_keys,
        growth = profile.growth_direction,
    )
}

/// Parses the model's answer, accepting bare JSON or a fenced code block.
pub fn parse_interpretation(text: &str) -> Result<Interpretation, NarrativeError> {
    let trimmed = text.trim();
    let raw: RawInterpretation = match serde_json::from_str(trimmed) {
        Ok(raw) => raw,
        Err(direct) => {
            let fenced = extract_fenced(trimmed)
                .ok_or_else(|| NarrativeError::Parse(direct.to_string()))?;
            serde_json::from_str(fenced).map_err(|e| NarrativeError::Parse(e.to_string()))?
        }
    };
    Ok(raw.into())
}

fn extract_fenced(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let end = after.find("```")?;
    Some(after[..end].trim())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawInterpretation {
    type_overview: String,
    wing_influence: String,
    instinct_focus: String,
    strengths_synergy: Option<String>,
    growth_path: String,
    career_insights: String,
    integrated_insight: Option<String>,
}

impl From<RawInterpretation> for Interpretation {
    fn from(raw: RawInterpretation) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Interpretation {
            type_overview: raw.type_overview,
            wing_influence: raw.wing_influence,
            instinct_focus: raw.instinct_focus,
            strengths_synergy: non_empty(raw.strengths_synergy),
            growth_path: raw.growth_path,
            career_insights: raw.career_insights,
            integrated_insight: non_empty(raw.integrated_insight),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<MessageBody>,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::{EnneagramType, Instinct};
    use crate::ports::StrengthsContext;

    fn request(strengths: Option<StrengthsContext>) -> NarrativeRequest {
        NarrativeRequest {
            primary_type: EnneagramType::Eight,
            wing: EnneagramType::Seven,
            instinct: Instinct::So,
            confidence: "high".into(),
            strengths,
            locale: Locale::En,
        }
    }

    #[test]
    fn placeholder_and_short_keys_are_rejected() {
        assert!(!is_usable_api_key(""));
        assert!(!is_usable_api_key("short"));
        assert!(!is_usable_api_key(PLACEHOLDER_KEY));
        assert!(is_usable_api_key("sk-ant-0123456789"));
    }

    #[test]
    fn generator_refuses_unusable_key() {
        let result = AnthropicNarrativeGenerator::new(AnthropicNarrativeConfig::new(PLACEHOLDER_KEY));
        assert!(matches!(result, Err(NarrativeError::NotConfigured(_))));
    }

    #[test]
    fn prompt_describes_the_profile() {
        let prompt = build_prompt(&request(None));
        assert!(prompt.contains("Type 8 - The Challenger (The Protector)"));
        assert!(prompt.contains("(8w7)"));
        assert!(prompt.contains("Dominant Instinct: Social"));
        assert!(prompt.contains("moving toward Type 2"));
        assert!(!prompt.contains("strengthsSynergy"));
    }

    #[test]
    fn prompt_includes_strengths_when_present() {
        let strengths = StrengthsContext {
            skills: vec!["Negotiation".into()],
            attitudes: vec![],
            values: vec!["Justice".into()],
        };
        let prompt = build_prompt(&request(Some(strengths)));
        assert!(prompt.contains("- Skills: Negotiation"));
        assert!(prompt.contains("- Attitudes: None identified"));
        assert!(prompt.contains("strengthsSynergy"));
    }

    #[test]
    fn parses_bare_json() {
        let text = r#"{"typeOverview":"a","wingInfluence":"b","instinctFocus":"c","growthPath":"d","careerInsights":"e"}"#;
        let i = parse_interpretation(text).unwrap();
        assert_eq!(i.type_overview, "a");
        assert_eq!(i.career_insights, "e");
        assert!(i.strengths_synergy.is_none());
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here you go:\n```json\n{\"typeOverview\":\"x\",\"strengthsSynergy\":\"\"}\n```";
        let i = parse_interpretation(text).unwrap();
        assert_eq!(i.type_overview, "x");
        assert_eq!(i.wing_influence, "");
        assert!(i.strengths_synergy.is_none());
    }

    #[test]
    fn rejects_prose() {
        assert!(matches!(
            parse_interpretation("I cannot help with that."),
            Err(NarrativeError::Parse(_))
        ));
    }
}
