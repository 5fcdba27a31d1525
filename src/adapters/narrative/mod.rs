//! Narrative Adapters
//!
//! Implementations of the `NarrativeGenerator` port.
//!
//! - **AnthropicNarrativeGenerator** - Interpretations from the Messages API
//! - **TemplateNarrativeGenerator** - Deterministic prose from type profiles
//! - **FailoverNarrativeGenerator** - Primary generator with template fallback

mod anthropic_generator;
mod failover_generator;
mod template_generator;

pub use anthropic_generator::{
    build_prompt, is_usable_api_key, parse_interpretation, AnthropicNarrativeConfig,
    AnthropicNarrativeGenerator,
};
pub use failover_generator::FailoverNarrativeGenerator;
pub use template_generator::TemplateNarrativeGenerator;
