//! HTTP adapters - REST API implementations.

pub mod enneagram;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

pub use enneagram::{enneagram_routes, EnneagramAppState};

/// Application router: assessment endpoints under `/api/enneagram` plus `/health`.
pub fn app_router(state: EnneagramAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/enneagram", enneagram_routes(state))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
