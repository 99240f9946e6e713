//! OpenRouter API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat Completion
// =============================================================================

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "meta-llama/llama-3.1-8b-instruct")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Sampling temperature (0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens in completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Response format (JSON object mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            model: "meta-llama/llama-3.1-8b-instruct".to_string(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Request a JSON object response.
    ///
    /// OpenRouter's free-tier models accept `json_object` mode but not
    /// schema-strict mode, so callers must still validate the payload.
    pub fn json_response(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Response format selector.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// JSON object mode (`{"type": "json_object"}`).
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Response content
    pub content: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageResponse {
    pub content: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,

    /// Tokens in the completion
    pub completion_tokens: u32,

    /// Total tokens used
    pub total_tokens: u32,
}

// =============================================================================
// Model Catalog
// =============================================================================

/// Raw model listing from `GET /models`.
#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponseRaw {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// A single model catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    /// Model identifier (e.g., "anthropic/claude-3-haiku")
    pub id: String,
}

// =============================================================================
// Utilities
// =============================================================================

/// Strip markdown code blocks from a response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let sys = Message::system("You are helpful");
        assert_eq!(sys.role, "system");

        let user = Message::user("Hello");
        assert_eq!(user.role, "user");

        let assistant = Message::assistant("Hi there");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_chat_request_builder() {
        let req = ChatRequest::new("anthropic/claude-3-haiku")
            .message(Message::user("Hello"))
            .temperature(0.3)
            .max_tokens(1000)
            .json_response();

        assert_eq!(req.model, "anthropic/claude-3-haiku");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(1000));
        assert_eq!(
            req.response_format.as_ref().map(|f| f.format_type.as_str()),
            Some("json_object")
        );
    }

    #[test]
    fn test_request_serialization_skips_empty_options() {
        let req = ChatRequest::new("test/model").message(Message::user("hi"));
        let json = serde_json::to_value(&req).unwrap();

        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("{}"), "{}");
    }
}
