//! HTTP routes for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_session, get_items, get_session, interpret, score, submit_answers, EnneagramAppState};

/// Creates the assessment router, meant to be nested under `/api/enneagram`.
///
/// # Routes
/// - `POST /sessions` - Start a session
/// - `GET /sessions/:id` - Session snapshot
/// - `GET /items` - Items or prompts for a stage
/// - `POST /answer` - Record answers for a stage
/// - `POST /score` - Compute the result
/// - `POST /interpret` - Prose interpretation
pub fn enneagram_routes(state: EnneagramAppState) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session))
        .route("/items", get(get_items))
        .route("/answer", post(submit_answers))
        .route("/score", post(score))
        .route("/interpret", post(interpret))
        .with_state(state)
}
