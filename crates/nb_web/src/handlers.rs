use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use nb_core::Error;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::AppState;

fn authorize(state: &AppState, headers: &HeaderMap) -> nb_core::Result<()> {
    let expected = format!("Bearer {}", state.trigger_token);
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    match presented {
        Some(value) if value == expected => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}

fn unauthorized(e: Error) -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Run the pipeline and block until it finishes, returning the summary.
pub async fn run_now(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(e) = authorize(&state, &headers) {
        return unauthorized(e);
    }

    match state.pipeline.run().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!("❌ Run failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Kick off a run and return immediately. The outcome only shows up in
/// the logs; callers that need the summary use the synchronous trigger.
pub async fn run_background(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(e) = authorize(&state, &headers) {
        return unauthorized(e);
    }

    tokio::spawn(async move {
        match state.pipeline.run().await {
            Ok(summary) => info!(
                "✅ Background run finished: {} article(s) selected",
                summary.selected
            ),
            Err(e) => error!("❌ Background run failed: {}", e),
        }
    });

    (StatusCode::ACCEPTED, Json(json!({ "status": "accepted" }))).into_response()
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
