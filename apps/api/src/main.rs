mod classify;
mod config;
mod dataset;
mod errors;
mod llm_client;
mod prompts;
mod routes;
mod state;
mod synthesis;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::DatasetStore;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::prompts::TemplateStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("larder_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Larder API v{}", env!("CARGO_PKG_VERSION"));

    // Fixed in-memory dataset, immutable after this point
    let dataset = Arc::new(DatasetStore::seed());
    info!(
        "Dataset loaded: {} inventory items, {} sales records",
        dataset.inventory_count(),
        dataset.sales_count()
    );

    // Prompt templates (missing files degrade to fallbacks, never fatal)
    let templates = Arc::new(TemplateStore::load(&config.prompts_dir));

    // Generation client; absence of the key switches to canned responses
    let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Generation client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            warn!("GEMINI_API_KEY not set; serving canned responses");
            None
        }
    };

    let state = AppState {
        dataset,
        templates,
        generator,
    };

    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:3000".parse::<HeaderValue>()?,
            "http://localhost:3001".parse::<HeaderValue>()?,
            "http://localhost:5173".parse::<HeaderValue>()?,
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
