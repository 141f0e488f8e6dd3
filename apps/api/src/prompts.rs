//! Prompt template store.
//!
//! Templates are plain text files, one per query category plus a default,
//! each carrying the `{query}` and `{context}` placeholders. Missing files
//! are never fatal: `get` falls back to the default template, then to a
//! built-in prompt, so the service can always build something to send.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, info, warn};

pub const PLACEHOLDER_QUERY: &str = "{query}";
pub const PLACEHOLDER_CONTEXT: &str = "{context}";

/// Template files looked up in the prompts directory, keyed by name.
const TEMPLATE_FILES: &[(&str, &str)] = &[
    ("inventory", "inventory.txt"),
    ("sales", "sales.txt"),
    ("low_stock", "low_stock.txt"),
    ("top_selling", "top_selling.txt"),
    ("overview", "overview.txt"),
    ("default", "default.txt"),
];

/// Last-resort prompt when neither the named file nor `default.txt` loaded.
const FALLBACK_TEMPLATE: &str = "You are a helpful restaurant management assistant.

USER QUERY: {query}

DATA CONTEXT:
{context}

Please provide a helpful, accurate response based on the data provided. \
Be professional and focus on restaurant operations.";

/// Name→template mapping loaded from a directory.
///
/// `reload` builds the replacement mapping completely before swapping it in
/// under the write lock, so concurrent readers see either the old or the new
/// mapping, never a partial one.
pub struct TemplateStore {
    dir: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl TemplateStore {
    /// Loads all templates from `dir`. A missing directory or missing
    /// individual files are logged and skipped.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let store = Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        };
        store.reload();
        store
    }

    /// Re-reads every template file and swaps the mapping atomically.
    /// Returns the number of templates loaded.
    pub fn reload(&self) -> usize {
        let fresh = read_templates(&self.dir);
        let loaded = fresh.len();
        info!("Loaded {loaded} prompt templates from {}", self.dir.display());
        *self.cache.write().expect("template cache lock poisoned") = fresh;
        loaded
    }

    pub fn len(&self) -> usize {
        self.cache.read().expect("template cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the named template, falling back to `default`, then to the
    /// built-in prompt.
    pub fn get(&self, name: &str) -> String {
        let cache = self.cache.read().expect("template cache lock poisoned");
        if let Some(body) = cache.get(name) {
            return body.clone();
        }
        if let Some(body) = cache.get("default") {
            debug!("Using default prompt for template '{name}'");
            return body.clone();
        }
        warn!("No prompt loaded for '{name}', using built-in fallback");
        FALLBACK_TEMPLATE.to_string()
    }

    /// Renders the named template with the raw query text and the
    /// JSON-serialized context.
    pub fn render(&self, name: &str, query: &str, context_json: &str) -> String {
        self.get(name)
            .replace(PLACEHOLDER_QUERY, query)
            .replace(PLACEHOLDER_CONTEXT, context_json)
    }

    /// Loaded template names, sorted.
    pub fn names(&self) -> Vec<String> {
        let cache = self.cache.read().expect("template cache lock poisoned");
        let mut names: Vec<String> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    /// First line of each loaded template, truncated to 100 characters.
    pub fn previews(&self) -> BTreeMap<String, String> {
        let cache = self.cache.read().expect("template cache lock poisoned");
        cache
            .iter()
            .map(|(name, body)| {
                let first_line = body.lines().next().unwrap_or_default();
                let preview: String = first_line.chars().take(100).collect();
                (name.clone(), preview)
            })
            .collect()
    }

    /// Reports, per loaded template, whether both required placeholders are
    /// present. Diagnostics only; never blocks serving.
    pub fn validate(&self) -> BTreeMap<String, bool> {
        let cache = self.cache.read().expect("template cache lock poisoned");
        cache
            .iter()
            .map(|(name, body)| {
                let valid =
                    body.contains(PLACEHOLDER_QUERY) && body.contains(PLACEHOLDER_CONTEXT);
                if !valid {
                    warn!("Prompt '{name}' is missing a required placeholder");
                }
                (name.clone(), valid)
            })
            .collect()
    }
}

fn read_templates(dir: &Path) -> HashMap<String, String> {
    let mut templates = HashMap::new();
    if !dir.is_dir() {
        warn!("Prompts directory '{}' not found", dir.display());
        return templates;
    }
    for (name, filename) in TEMPLATE_FILES {
        let path = dir.join(filename);
        match fs::read_to_string(&path) {
            Ok(body) => {
                templates.insert(name.to_string(), body.trim().to_string());
            }
            Err(err) => {
                warn!("Prompt file not loaded ({}): {err}", path.display());
            }
        }
    }
    templates
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
