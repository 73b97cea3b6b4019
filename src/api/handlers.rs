//! HTTP request handlers

use super::types::{ChatReply, ErrorResponse};
use super::AppState;
use crate::conversation::ChatRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The single conversational endpoint
        .route("/chatbot", post(chatbot))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chatbot Handler
// ============================================================

/// Generic client-facing failure text; the log line carries the detail.
const LOOKUP_FAILED_MESSAGE: &str =
    "The weather service is unavailable right now. Please try again.";

/// Drive one conversation turn and return the reply
async fn chatbot(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.chatbot.respond(&request).await.map_err(|e| {
        tracing::error!(kind = ?e.kind, error = %e, "Lookup failed during conversation turn");
        AppError::Internal(LOOKUP_FAILED_MESSAGE.to_string())
    })?;

    Ok(Json(ChatReply { reply }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("clima-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
