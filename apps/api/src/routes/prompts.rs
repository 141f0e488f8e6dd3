//! Prompt template introspection and reload endpoints.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PromptInfoResponse {
    pub available_prompts: Vec<String>,
    pub prompt_previews: BTreeMap<String, String>,
    pub validation_status: BTreeMap<String, bool>,
}

/// GET /prompt-info
pub async fn prompt_info_handler(State(state): State<AppState>) -> Json<PromptInfoResponse> {
    Json(PromptInfoResponse {
        available_prompts: state.templates.names(),
        prompt_previews: state.templates.previews(),
        validation_status: state.templates.validate(),
    })
}

/// POST /prompt-reload
/// Re-reads the template directory and swaps the mapping in atomically.
pub async fn prompt_reload_handler(State(state): State<AppState>) -> Json<Value> {
    info!("Reloading prompt templates");
    let loaded = state.templates.reload();
    Json(json!({
        "status": "reloaded",
        "loaded": loaded,
    }))
}
