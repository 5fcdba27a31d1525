//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    GetSessionHandler, GetSessionQuery, GetStageItemsHandler, GetStageItemsQuery,
    InterpretResultCommand, InterpretResultHandler, InterpretationView, ScoreAssessmentHandler,
    ScoreAssessmentQuery, StageItemsView, StartSessionCommand, StartSessionHandler,
    SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult,
};
