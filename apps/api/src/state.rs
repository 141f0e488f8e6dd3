use std::sync::Arc;

use crate::dataset::DatasetStore;
use crate::llm_client::TextGenerator;
use crate::prompts::TemplateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<DatasetStore>,
    pub templates: Arc<TemplateStore>,
    /// `None` when no generation credential is configured; the synthesizer
    /// then serves canned responses.
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    pub fn generation_configured(&self) -> bool {
        self.generator.is_some()
    }
}
