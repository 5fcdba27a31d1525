//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentSessionStore` - Session persistence with get-or-create plan
//! - `NarrativeGenerator` - Prose interpretation of a finished result

mod narrative_generator;
mod session_store;

pub use narrative_generator::{
    GeneratedNarrative, Interpretation, NarrativeError, NarrativeGenerator, NarrativeRequest,
    NarrativeSource, StrengthsContext,
};
pub use session_store::{AssessmentSessionStore, SessionStoreError};
