//! HTTP routes for the Calbot API

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use calbot_core::AppContext;

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Build the API router over the shared application context
pub fn router(context: Arc<AppContext>) -> Router {
    // Permissive CORS; tighten for production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/calendly/ask", post(ask_handler))
        .layer(cors)
        .with_state(context)
}

/// Liveness probe
async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Calendly Scheduling API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Detailed health check
async fn health_handler(State(context): State<Arc<AppContext>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "mcp_client": "connected",
        "llm": if context.llm_available() { "available" } else { "not configured" },
    }))
}

/// Answer one scheduling question.
///
/// Tool-invocation failures come back as a 200 with a conversational
/// explanation; only empty input and infrastructure failures map to
/// error statuses.
async fn ask_handler(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, (StatusCode, Json<ErrorResponse>)> {
    if request.question.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Question cannot be empty.",
        ));
    }

    match context.workflow().answer(&request.question).await {
        Ok(answer) => Ok(Json(AnswerResponse { answer })),
        Err(e) => {
            error!(error = %e, "Error during workflow execution");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &e.to_string(),
            ))
        }
    }
}

fn error_response(status: StatusCode, detail: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            detail: detail.to_string(),
        }),
    )
}
