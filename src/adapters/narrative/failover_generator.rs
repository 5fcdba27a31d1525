//! Failover Narrative Generator - Template prose whenever the primary fails.
//!
//! ```ignore
//! let generator = FailoverNarrativeGenerator::new()
//!     .with_primary(Arc::new(AnthropicNarrativeGenerator::new(config)?));
//! ```
//!
//! Without a primary every request is served by the template generator.

use async_trait::async_trait;
use std::sync::Arc;

use super::template_generator::TemplateNarrativeGenerator;
use crate::ports::{GeneratedNarrative, NarrativeError, NarrativeGenerator, NarrativeRequest, NarrativeSource};

/// Wraps an optional primary generator and never fails.
#[derive(Clone, Default)]
pub struct FailoverNarrativeGenerator {
    primary: Option<Arc<dyn NarrativeGenerator>>,
    fallback: TemplateNarrativeGenerator,
}

impl FailoverNarrativeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, primary: Arc<dyn NarrativeGenerator>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    fn fallback(&self, request: &NarrativeRequest) -> GeneratedNarrative {
        GeneratedNarrative {
            interpretation: self.fallback.render(request),
            source: NarrativeSource::Fallback,
        }
    }
}

#[async_trait]
impl NarrativeGenerator for FailoverNarrativeGenerator {
    async fn generate(&self, request: &NarrativeRequest) -> Result<GeneratedNarrative, NarrativeError> {
        let Some(primary) = &self.primary else {
            return Ok(self.fallback(request));
        };

        match primary.generate(request).await {
            Ok(narrative) => Ok(narrative),
            Err(err) => {
                tracing::warn!(
                    generator = primary.name(),
                    error = %err,
                    "Narrative generation failed, using template"
                );
                Ok(self.fallback(request))
            }
        }
    }

    fn name(&self) -> &'static str {
        self.primary.as_ref().map_or("template", |p| p.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enneagram::{EnneagramType, Instinct};
    use crate::domain::foundation::Locale;
    use crate::ports::Interpretation;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedGenerator {
        fail: bool,
        calls: AtomicU32,
    }

    impl ScriptedGenerator {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl NarrativeGenerator for ScriptedGenerator {
        async fn generate(&self, _: &NarrativeRequest) -> Result<GeneratedNarrative, NarrativeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NarrativeError::Provider {
                    status: 503,
                    message: "overloaded".into(),
                });
            }
            Ok(GeneratedNarrative {
                interpretation: Interpretation {
                    type_overview: "scripted".into(),
                    wing_influence: String::new(),
                    instinct_focus: String::new(),
                    strengths_synergy: None,
                    growth_path: String::new(),
                    career_insights: String::new(),
                    integrated_insight: None,
                },
                source: NarrativeSource::Ai,
            })
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn request() -> NarrativeRequest {
        NarrativeRequest {
            primary_type: EnneagramType::Three,
            wing: EnneagramType::Two,
            instinct: Instinct::Sx,
            confidence: "medium".into(),
            strengths: None,
            locale: Locale::En,
        }
    }

    #[tokio::test]
    async fn without_primary_uses_template() {
        let generator = FailoverNarrativeGenerator::new();
        let narrative = generator.generate(&request()).await.unwrap();
        assert_eq!(narrative.source, NarrativeSource::Fallback);
        assert_eq!(generator.name(), "template");
    }

    #[tokio::test]
    async fn primary_success_is_returned() {
        let primary = ScriptedGenerator::new(false);
        let generator = FailoverNarrativeGenerator::new().with_primary(primary.clone());
        let narrative = generator.generate(&request()).await.unwrap();
        assert_eq!(narrative.source, NarrativeSource::Ai);
        assert_eq!(narrative.interpretation.type_overview, "scripted");
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn primary_failure_falls_back() {
        let primary = ScriptedGenerator::new(true);
        let generator = FailoverNarrativeGenerator::new().with_primary(primary.clone());
        let narrative = generator.generate(&request()).await.unwrap();
        assert_eq!(narrative.source, NarrativeSource::Fallback);
        assert!(narrative.interpretation.type_overview.contains("The Achiever"));
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
    }
}
