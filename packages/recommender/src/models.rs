//! Capability tiers and model resolution.
//!
//! Tiers name what the caller wants (fast, smart, ...); resolution maps a
//! tier to a concrete model identifier that is actually available right
//! now, falling back through a static chain of universally reliable free
//! models. Resolution never fails: a dead catalog endpoint degrades to
//! the head of the fallback chain.

use tracing::{debug, warn};

use crate::completion::CompletionBackend;

/// Requested capability class for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// General conversation
    Chat,
    /// Lowest-latency responses
    Fast,
    /// Creative generation
    Creative,
    /// Strongest reasoning
    Smart,
    /// Structured/code-like output
    Programming,
}

impl ModelTier {
    /// Preferred model identifier for this tier.
    pub fn preferred_model(&self) -> &'static str {
        match self {
            ModelTier::Chat => "meta-llama/llama-3.1-8b-instruct",
            ModelTier::Fast => "microsoft/phi-3-mini-4k-instruct",
            ModelTier::Creative => "google/gemini-flash-1.5",
            ModelTier::Smart => "anthropic/claude-3-haiku",
            ModelTier::Programming => "microsoft/phi-3-mini-4k-instruct",
        }
    }
}

/// Free models considered universally reliable, in fallback order.
pub const FALLBACK_MODELS: [&str; 4] = [
    "meta-llama/llama-3.1-8b-instruct",
    "anthropic/claude-3-haiku",
    "google/gemini-flash-1.5",
    "microsoft/phi-3-mini-4k-instruct",
];

/// Last-resort identifier when nothing in the catalog matches.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";

/// Resolve a tier to an available model identifier.
///
/// Queries the backend's catalog once; on catalog failure returns the
/// first fallback without retrying. Otherwise prefers the tier's model,
/// then the first available fallback, then the hard default.
pub async fn resolve_model(backend: &dyn CompletionBackend, tier: ModelTier) -> String {
    let preferred = tier.preferred_model();

    let available = match backend.available_models().await {
        Ok(models) => models,
        Err(e) => {
            warn!(error = %e, "model catalog unavailable, using first fallback");
            return FALLBACK_MODELS[0].to_string();
        }
    };

    if available.iter().any(|m| m == preferred) {
        return preferred.to_string();
    }

    for fallback in FALLBACK_MODELS {
        if available.iter().any(|m| m == fallback) {
            debug!(model = fallback, preferred, "preferred model unavailable, using fallback");
            return fallback.to_string();
        }
    }

    debug!(model = DEFAULT_MODEL, "no catalog match, using default model");
    DEFAULT_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    #[tokio::test]
    async fn test_preferred_model_when_available() {
        let backend = MockCompletion::new().with_available_models(vec![
            "anthropic/claude-3-haiku".to_string(),
            "something/else".to_string(),
        ]);

        let model = resolve_model(&backend, ModelTier::Smart).await;
        assert_eq!(model, "anthropic/claude-3-haiku");
    }

    #[tokio::test]
    async fn test_falls_back_in_order() {
        // Smart's preferred model is missing; the second fallback is the
        // first one present.
        let backend = MockCompletion::new()
            .with_available_models(vec!["google/gemini-flash-1.5".to_string()]);

        let model = resolve_model(&backend, ModelTier::Smart).await;
        assert_eq!(model, "google/gemini-flash-1.5");
    }

    #[tokio::test]
    async fn test_default_when_catalog_has_no_match() {
        let backend =
            MockCompletion::new().with_available_models(vec!["unknown/model".to_string()]);

        let model = resolve_model(&backend, ModelTier::Chat).await;
        assert_eq!(model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_catalog_failure_uses_first_fallback() {
        let backend = MockCompletion::new().with_catalog_failure();

        let model = resolve_model(&backend, ModelTier::Creative).await;
        assert_eq!(model, FALLBACK_MODELS[0]);
    }
}
