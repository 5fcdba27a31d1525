//! HTTP handlers for assessment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::{
    GetSessionHandler, GetSessionQuery, GetStageItemsHandler, GetStageItemsQuery,
    InterpretResultCommand, InterpretResultHandler, ScoreAssessmentHandler, ScoreAssessmentQuery,
    StartSessionCommand, StartSessionHandler, SubmitAnswersCommand, SubmitAnswersHandler,
};
use crate::domain::enneagram::{AssessmentError, AssessmentOrchestrator};
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::{AssessmentSessionStore, NarrativeGenerator};

use super::dto::{
    CreateSessionRequest, ErrorResponse, InterpretRequest, InterpretResponse, ScoreRequest,
    SessionResponse, StageItemsQuery, StageItemsResponse, SubmitAnswersRequest,
    SubmitAnswersResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct EnneagramAppState {
    start_handler: Arc<StartSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
    items_handler: Arc<GetStageItemsHandler>,
    answer_handler: Arc<SubmitAnswersHandler>,
    score_handler: Arc<ScoreAssessmentHandler>,
    interpret_handler: Arc<InterpretResultHandler>,
}

impl EnneagramAppState {
    pub fn new(
        start_handler: Arc<StartSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
        items_handler: Arc<GetStageItemsHandler>,
        answer_handler: Arc<SubmitAnswersHandler>,
        score_handler: Arc<ScoreAssessmentHandler>,
        interpret_handler: Arc<InterpretResultHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            items_handler,
            answer_handler,
            score_handler,
            interpret_handler,
        }
    }

    /// Builds every handler over one store, orchestrator, and generator.
    pub fn from_ports(
        store: Arc<dyn AssessmentSessionStore>,
        orchestrator: AssessmentOrchestrator,
        generator: Arc<dyn NarrativeGenerator>,
    ) -> Self {
        Self::new(
            Arc::new(StartSessionHandler::new(store.clone())),
            Arc::new(GetSessionHandler::new(store.clone())),
            Arc::new(GetStageItemsHandler::new(store.clone(), orchestrator.clone())),
            Arc::new(SubmitAnswersHandler::new(store.clone(), orchestrator.clone())),
            Arc::new(ScoreAssessmentHandler::new(store.clone(), orchestrator.clone())),
            Arc::new(InterpretResultHandler::new(store, orchestrator, generator)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/enneagram/sessions - Start a session
pub async fn create_session(
    State(state): State<EnneagramAppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = StartSessionCommand { locale: req.locale };

    match state.start_handler.handle(cmd).await {
        Ok(session) => (StatusCode::CREATED, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/enneagram/sessions/:id - Session snapshot
pub async fn get_session(State(state): State<EnneagramAppState>, Path(session_id): Path<String>) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(session))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/enneagram/items?stage=&locale=&sessionId= - Stage content
pub async fn get_items(State(state): State<EnneagramAppState>, Query(params): Query<StageItemsQuery>) -> Response {
    let session_id = match params.session_id.as_deref().map(parse_session_id).transpose() {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetStageItemsQuery {
        stage: params.stage,
        locale: params.locale,
        session_id,
    };

    match state.items_handler.handle(query).await {
        Ok(view) => (StatusCode::OK, Json(StageItemsResponse::from(view))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/enneagram/answer - Record answers for a stage
pub async fn submit_answers(
    State(state): State<EnneagramAppState>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Response {
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitAnswersCommand {
        session_id,
        stage: req.stage,
        input: req.input,
        locale: req.locale,
    };

    match state.answer_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(SubmitAnswersResponse::from(result))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/enneagram/score - Compute the result
pub async fn score(State(state): State<EnneagramAppState>, Json(req): Json<ScoreRequest>) -> Response {
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.score_handler.handle(ScoreAssessmentQuery { session_id }).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/enneagram/interpret - Prose interpretation of the result
pub async fn interpret(State(state): State<EnneagramAppState>, Json(req): Json<InterpretRequest>) -> Response {
    let session_id = match parse_session_id(&req.session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = InterpretResultCommand {
        session_id,
        strengths: req.strengths,
        locale: req.locale,
    };

    match state.interpret_handler.handle(cmd).await {
        Ok(view) => {
            let response = InterpretResponse::new(session_id.to_string(), view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.trim().parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn status_for(error: &AssessmentError) -> StatusCode {
    match error {
        AssessmentError::InvalidInput { .. }
        | AssessmentError::UnsupportedStage(_)
        | AssessmentError::IncompleteStage { .. } => StatusCode::BAD_REQUEST,
        AssessmentError::SessionNotFound(_) | AssessmentError::ResponsesNotFound(_) => StatusCode::NOT_FOUND,
        AssessmentError::Storage(_) | AssessmentError::NarrativeUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub(crate) fn handle_assessment_error(error: AssessmentError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Assessment request failed");
    } else {
        tracing::debug!(error = %error, "Assessment request rejected");
    }

    let details = match &error {
        AssessmentError::IncompleteStage { stage, progress } => Some(json!({
            "progress": {
                "answered": progress.answered,
                "required": progress.required,
                "ratio": progress.ratio(),
            },
            "nextStage": stage,
        })),
        _ => None,
    };

    let domain = DomainError::from(error);
    let mut body = ErrorResponse::new(domain.code.to_string(), domain.message);
    if let Some(details) = details {
        body = body.with_details(details);
    }

    (status, Json(body)).into_response()
}
