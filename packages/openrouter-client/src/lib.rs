//! Pure OpenRouter REST API client
//!
//! A clean, minimal client for the OpenRouter API with no domain-specific
//! logic. Supports chat completions, JSON-object response mode, and model
//! catalog listing.
//!
//! # Example
//!
//! ```rust,ignore
//! use openrouter_client::{OpenRouterClient, ChatRequest, Message};
//!
//! let client = OpenRouterClient::from_env()?;
//!
//! // Chat completion
//! let response = client.chat_completion(ChatRequest {
//!     model: "meta-llama/llama-3.1-8b-instruct".into(),
//!     messages: vec![Message::user("Hello!")],
//!     ..Default::default()
//! }).await?;
//!
//! // Model catalog
//! let available = client.list_models().await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenRouterError, Result};
pub use types::*;

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Pure OpenRouter API client.
#[derive(Clone)]
pub struct OpenRouterClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    referer: Option<String>,
    app_title: Option<String>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: None,
            app_title: None,
        }
    }

    /// Create from environment variable `OPENROUTER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| OpenRouterError::Config("OPENROUTER_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, self-hosted gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `HTTP-Referer` header OpenRouter uses for app attribution.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set the `X-Title` header OpenRouter uses for app attribution.
    pub fn with_app_title(mut self, title: impl Into<String>) -> Self {
        self.app_title = Some(title.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn attributed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut builder = builder
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer.clone());
        }
        if let Some(title) = &self.app_title {
            builder = builder.header("X-Title", title.clone());
        }
        builder
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get a response.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .attributed(
                self.http_client
                    .post(format!("{}/chat/completions", self.base_url)),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenRouter request failed");
                OpenRouterError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenRouter API error");
            return Err(OpenRouterError::Api(format!(
                "OpenRouter API error: {} {}",
                status, error_text
            )));
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenRouterError::Parse(e.to_string()))?;

        let usage = chat_response.usage;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| OpenRouterError::Api("No response from OpenRouter".into()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenRouter chat completion"
        );

        Ok(ChatResponse { content, usage })
    }

    /// List the currently available model identifiers.
    ///
    /// Calls `GET /models` and returns the catalog ids. Availability changes
    /// over time, so callers should treat the result as a snapshot.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .attributed(self.http_client.get(format!("{}/models", self.base_url)))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenRouter model listing failed");
                OpenRouterError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OpenRouterError::Api(format!(
                "OpenRouter models API error: {} {}",
                status, error_text
            )));
        }

        let models: types::ModelsResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenRouterError::Parse(e.to_string()))?;

        Ok(models.data.into_iter().map(|m| m.id).collect())
    }
}
