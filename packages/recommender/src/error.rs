//! Typed errors for the recommendation pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Propagation policy: only [`RecommendError::Config`] ever crosses the
//! pipeline boundary as a failed result. Every other variant is absorbed
//! by the orchestrator and converted into a degraded-but-successful
//! response, because the product requirement is that the user always gets
//! something actionable back.

use thiserror::Error;

/// Errors that can occur while producing a recommendation.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Required credential or setting missing
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion backend unavailable or failed
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Completion backend returned non-parseable or schema-violating output
    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    /// Web search failed
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Program store operation failed
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the completion backend.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Backend not configured (missing API key)
    #[error("completion backend not configured: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit)
    #[error("API error: {0}")]
    Api(String),

    /// Response could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from a single search provider.
///
/// The [`crate::search::WebSearchService`] absorbs these; they never reach
/// the orchestrator's caller.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Provider credential not configured
    #[error("{provider} API key not configured")]
    MissingApiKey { provider: &'static str },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Provider returned a non-2xx response
    #[error("provider error: {0}")]
    Api(String),

    /// Provider response could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, RecommendError>;

#[cfg(feature = "openrouter")]
impl From<openrouter_client::OpenRouterError> for CompletionError {
    fn from(err: openrouter_client::OpenRouterError) -> Self {
        use openrouter_client::OpenRouterError;
        match err {
            OpenRouterError::Config(msg) => CompletionError::Config(msg),
            OpenRouterError::Network(msg) => CompletionError::Network(msg),
            OpenRouterError::Api(msg) => CompletionError::Api(msg),
            OpenRouterError::Parse(msg) => CompletionError::Parse(msg),
        }
    }
}
