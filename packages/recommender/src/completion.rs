//! Completion backend trait seam.
//!
//! The orchestrator talks to the completion service and its model catalog
//! through this trait so the pipeline is testable without a network. The
//! reference implementation over OpenRouter lives in [`crate::backend`]
//! (feature `openrouter`); tests use `testing::MockCompletion`.

use async_trait::async_trait;

use crate::error::CompletionError;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One chat message in a completion request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A completion request at the pipeline's boundary.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Concrete model identifier (already resolved from a tier)
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the backend for a JSON object response. Backends may ignore
    /// this, so callers must still parse defensively.
    pub json_output: bool,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: 0.7,
            max_tokens: 512,
            json_output: false,
        }
    }

    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }
}

/// Completion service boundary: chat completions plus the model catalog.
///
/// Any transport failure, non-2xx status, or timeout surfaces as a
/// [`CompletionError`]; the orchestrator treats them all as recoverable.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Issue one completion request and return the backend's raw text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// List the currently available model identifiers.
    async fn available_models(&self) -> Result<Vec<String>, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("meta-llama/llama-3.1-8b-instruct")
            .message(ChatMessage::system("You are helpful"))
            .message(ChatMessage::user("Hello"))
            .temperature(0.3)
            .max_tokens(1000)
            .json_output(true);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.temperature, 0.3);
        assert!(request.json_output);
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }
}
