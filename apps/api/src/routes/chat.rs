//! The chat endpoint: classify, retrieve, synthesize.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::{build_context, QueryContext};
use crate::errors::AppError;
use crate::state::AppState;
use crate::synthesis::synthesize;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub data_used: QueryContext,
}

/// POST /chat
///
/// Generation failures never surface as HTTP errors: the reply becomes an
/// apology string carrying the error description, returned with status 200.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".to_string()));
    }

    let context = build_context(&request.message, &state.dataset);
    info!("Classified query as '{}'", context.category().as_str());

    let response = match synthesize(
        &request.message,
        &context,
        &state.templates,
        state.generator.as_deref(),
    )
    .await
    {
        Ok(text) => text,
        Err(err) => {
            warn!("Generation failed, returning apology: {err}");
            format!("I apologize, but I encountered an error processing your request: {err}")
        }
    };

    Ok(Json(ChatResponse {
        response,
        data_used: context,
    }))
}
