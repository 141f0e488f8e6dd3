pub mod chat;
pub mod health;
pub mod prompts;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Larder API is running!" }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/chat", post(chat::chat_handler))
        .route("/health", get(health::health_handler))
        .route("/prompt-info", get(prompts::prompt_info_handler))
        .route("/prompt-reload", post(prompts::prompt_reload_handler))
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetStore;
    use crate::llm_client::{GenerationError, TextGenerator};
    use crate::prompts::TemplateStore;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 500,
                message: "backend exploded".to_string(),
            })
        }
    }

    fn canned_state() -> AppState {
        AppState {
            dataset: Arc::new(DatasetStore::seed()),
            templates: Arc::new(TemplateStore::load(TempDir::new().unwrap().path())),
            generator: None,
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = build_router(canned_state());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Larder API is running!");
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let app = build_router(canned_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["generation_configured"], false);
        assert_eq!(json["inventory_count"], 6);
        assert_eq!(json["sales_count"], 6);
    }

    #[tokio::test]
    async fn test_chat_canned_round_trip() {
        let app = build_router(canned_state());
        let response = app
            .oneshot(post_json("/chat", r#"{"message": "How many burgers are left?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["response"].as_str().unwrap().contains("24"));
        assert_eq!(json["data_used"]["category"], "inventory");
        assert_eq!(json["data_used"]["payload"]["name"], "Burger");
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_rejected() {
        let app = build_router(canned_state());
        let response = app
            .oneshot(post_json("/chat", r#"{"message": "   "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_chat_generation_failure_returns_apology_with_200() {
        let mut state = canned_state();
        state.generator = Some(Arc::new(FailingGenerator));
        let app = build_router(state);

        let response = app
            .oneshot(post_json("/chat", r#"{"message": "today's profit"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let reply = json["response"].as_str().unwrap();
        assert!(reply.contains("I apologize"));
        assert!(reply.contains("backend exploded"));
        assert_eq!(json["data_used"]["category"], "sales");
    }

    #[tokio::test]
    async fn test_prompt_info_round_trip() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("inventory.txt"), "Inv {query} {context}").unwrap();
        std::fs::write(dir.path().join("sales.txt"), "missing placeholders").unwrap();

        let state = AppState {
            dataset: Arc::new(DatasetStore::seed()),
            templates: Arc::new(TemplateStore::load(dir.path())),
            generator: None,
        };
        let app = build_router(state);

        let response = app
            .oneshot(Request::get("/prompt-info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["available_prompts"], serde_json::json!(["inventory", "sales"]));
        assert_eq!(json["prompt_previews"]["inventory"], "Inv {query} {context}");
        assert_eq!(json["validation_status"]["inventory"], true);
        assert_eq!(json["validation_status"]["sales"], false);
    }

    #[tokio::test]
    async fn test_prompt_reload_reports_count() {
        let dir = TempDir::new().unwrap();
        let state = AppState {
            dataset: Arc::new(DatasetStore::seed()),
            templates: Arc::new(TemplateStore::load(dir.path())),
            generator: None,
        };
        let app = build_router(state.clone());

        std::fs::write(dir.path().join("default.txt"), "Def {query} {context}").unwrap();
        let response = app
            .oneshot(post_json("/prompt-reload", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "reloaded");
        assert_eq!(json["loaded"], 1);
        assert_eq!(state.templates.len(), 1);
    }
}
