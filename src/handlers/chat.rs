// src/handlers/chat.rs
use crate::handlers::{api_error, ApiError};
use crate::models::ChatRequest;
use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;

pub fn chat_routes() -> Router {
    Router::new()
        .route("/chat/:country_code", post(chat_turn))
        .route("/chat/:country_code/history", get(chat_history))
}

/// POST /chat/:country_code with `{"message": "..."}`
pub async fn chat_turn(
    Path(country_code): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
    body: Option<Json<ChatRequest>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    tracing::info!("Received chat request for country: {}", country_code);
    let message = body.map(|Json(request)| request.message).unwrap_or_default();

    match state.chat.chat(&country_code, &message).await {
        Ok(response) => Ok(Json(json!({ "response": response }))),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err(api_error(status, e.to_string()))
        }
    }
}

/// GET /chat/:country_code/history
pub async fn chat_history(
    Path(country_code): Path<String>,
    Extension(state): Extension<Arc<AppState>>,
) -> Json<serde_json::Value> {
    let turns = state.chat.history(&country_code).await;
    Json(json!({ "country": country_code, "turns": turns }))
}
