//! Enneagram Module - Multi-stage personality classification.
//!
//! Answers flow through four stages: a 45-item screener scored into a
//! distribution over the nine types, forced-choice discriminators that
//! separate close candidates, an instinct questionnaire (sp/so/sx), and two
//! free-text reflections.
//!
//! # Components
//!
//! - `ItemBank` - Read-only catalog for both locales, built once at start-up
//! - `Stage1Scorer` - Raw sums and ratio probabilities per type
//! - `ConfidenceBand` - Margin-based confidence between the top two types
//! - `DiscriminatorSelector` - Pair selection, plan building, tally, narrowing
//! - `InstinctScorer` - Raw instinct sums and the dominant instinct
//! - `WingEstimate` - Stronger neighbour of the primary type
//! - `AssessmentOrchestrator` - Stage routing and result composition
//!
//! Everything here is pure and synchronous. Sessions are stored through the
//! `AssessmentSessionStore` port.

mod confidence;
mod discriminator;
mod errors;
mod instinct;
mod item;
mod item_bank;
mod orchestrator;
mod profile;
mod progress;
mod response;
mod scoring;
mod session;
mod stage;
mod types;
mod wing;

pub use confidence::{lead, ConfidenceBand, HIGH_LEAD, MEDIUM_LEAD};
pub use discriminator::{
    DiscriminatorPlan, DiscriminatorSelector, DiscriminatorTally, PlanEntry, CANDIDATE_COUNT,
    DEFAULT_PLAN_LEN, ITEMS_PER_PAIR, MAX_PAIRS,
};
pub use errors::AssessmentError;
pub use instinct::{InstinctScorer, InstinctScores};
pub use item::{DiscriminatorOptions, Item, ItemCategory};
pub use item_bank::{CatalogError, ItemBank};
pub use orchestrator::{AssessmentOrchestrator, AssessmentResult, StageContent, RESULT_VERSION};
pub use profile::{Localized, TypeProfile};
pub use progress::{StageProgress, NARRATIVE_TEXTS};
pub use response::{
    dedup_first_seen, known_entries, merge_by_id, parse_discriminator_entries, parse_likert_entries,
    parse_texts, DiscriminatorAnswer, DiscriminatorChoice, Keyed, LikertResponse,
};
pub use scoring::{rank, uniform_distribution, ProbabilityDistribution, RawScores, Stage1Scorer, TypeScores};
pub use session::{AssessmentSession, SessionResponses};
pub use stage::AssessmentStage;
pub use types::{DiscriminatorPair, EnneagramType, Instinct};
pub use wing::WingEstimate;
