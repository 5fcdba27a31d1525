//! Assessment command and query handlers.

mod get_session;
mod get_stage_items;
mod interpret_result;
mod score_assessment;
mod start_session;
mod submit_answers;

pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use get_stage_items::{GetStageItemsHandler, GetStageItemsQuery, StageItemsView};
pub use interpret_result::{InterpretResultCommand, InterpretResultHandler, InterpretationView};
pub use score_assessment::{ScoreAssessmentHandler, ScoreAssessmentQuery};
pub use start_session::{StartSessionCommand, StartSessionHandler};
pub use submit_answers::{SubmitAnswersCommand, SubmitAnswersHandler, SubmitAnswersResult};
