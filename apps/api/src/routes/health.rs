use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports whether generation is configured and how much data is loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "generation_configured": state.generation_configured(),
        "inventory_count": state.dataset.inventory_count(),
        "sales_count": state.dataset.sales_count(),
    }))
}
