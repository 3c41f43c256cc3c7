use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "API running" }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/db/health
pub async fn db_health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "provider": "postgres" })),
        ),
        Err(e) => {
            error!("Database health check failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": "Database connection failed" })),
            )
        }
    }
}

/// GET /api/navigation
pub async fn navigation_handler() -> Json<Value> {
    Json(json!({
        "links": [
            { "label": "Dashboard", "href": "/dashboard" },
            { "label": "Resume", "href": "/resume" },
            { "label": "Interview", "href": "/interview" },
            { "label": "Profile", "href": "/profile" }
        ]
    }))
}

/// GET /api/highlights
/// Static dashboard numbers.
pub async fn highlights_handler() -> Json<Value> {
    Json(json!({
        "atsScore": 82,
        "mockSessions": 128,
        "successRate": 96,
        "offersTracked": 47
    }))
}
