//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers load sessions through the store port, run the pure domain
//! components, and persist what changed.

pub mod handlers;

pub use handlers::{
    GetSessionHandler, GetSessionQuery, GetStageItemsHandler, GetStageItemsQuery,
    InterpretResultCommand, InterpretResultHandler, InterpretationView, ScoreAssessmentHandler,
    ScoreAssessmentQuery, StageItemsView, StartSessionCommand, StartSessionHandler,
    SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult,
};
