//! OpenRouter implementation of the completion backend trait.
//!
//! Bridges the pipeline's [`CompletionBackend`] seam to the pure
//! `openrouter-client` crate.

use async_trait::async_trait;
use openrouter_client::{ChatRequest, Message, OpenRouterClient};

use crate::completion::{CompletionBackend, CompletionRequest, Role};
use crate::config::PipelineConfig;
use crate::error::CompletionError;

/// OpenRouter-backed completion service.
#[derive(Clone)]
pub struct OpenRouterBackend {
    client: OpenRouterClient,
}

impl OpenRouterBackend {
    /// Wrap an existing client.
    pub fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }

    /// Build from configuration. Returns `None` when the credential is
    /// missing, which the orchestrator reports as its only hard failure.
    pub fn from_config(config: &PipelineConfig) -> Option<Self> {
        let key = config.openrouter_api_key.as_ref()?;
        let client = OpenRouterClient::new(key.expose()).with_app_title("Sahulat AI");
        Some(Self::new(client))
    }

    /// Access the underlying client.
    pub fn client(&self) -> &OpenRouterClient {
        &self.client
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let mut chat = ChatRequest::new(request.model)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens);

        for message in request.messages {
            chat = chat.message(match message.role {
                Role::System => Message::system(message.content),
                Role::User => Message::user(message.content),
                Role::Assistant => Message::assistant(message.content),
            });
        }

        if request.json_output {
            chat = chat.json_response();
        }

        let response = self.client.chat_completion(chat).await?;
        Ok(response.content)
    }

    async fn available_models(&self) -> Result<Vec<String>, CompletionError> {
        Ok(self.client.list_models().await?)
    }
}
