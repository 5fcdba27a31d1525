//! HTTP adapter for assessment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, ErrorResponse, InterpretRequest, InterpretResponse, ProgressResponse,
    ScoreRequest, SessionResponse, StageItemsQuery, StageItemsResponse, SubmitAnswersRequest,
    SubmitAnswersResponse,
};
pub use handlers::EnneagramAppState;
pub use routes::enneagram_routes;
