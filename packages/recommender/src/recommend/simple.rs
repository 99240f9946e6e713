//! Lightweight completion helpers: small-talk replies and LLM-assisted
//! profile enrichment.
//!
//! Both follow the pipeline's degradation rule: any upstream failure
//! collapses to a static or deterministic answer, never an error.

use serde::Deserialize;
use tracing::warn;

use super::{response, RecommendationService};
use crate::completion::{ChatMessage, CompletionRequest};
use crate::models::{resolve_model, ModelTier};
use crate::types::{ParsedAttributes, UserProfile};

const SIMPLE_TEMPERATURE: f32 = 0.7;
const SIMPLE_MAX_TOKENS: u32 = 200;
const ENHANCE_TEMPERATURE: f32 = 0.3;
const ENHANCE_MAX_TOKENS: u32 = 300;

const NOT_CONFIGURED_MESSAGE: &str = "AI service is not configured. Please contact support.";
const APOLOGY_MESSAGE: &str =
    "I apologize, but I'm having trouble right now. Please try again in a moment.";

/// `{updatedProfile, suggestions}` shape requested from the model.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileEnhancement {
    #[serde(default)]
    updated_profile: ParsedAttributes,
    #[serde(default)]
    suggestions: Vec<String>,
}

impl RecommendationService {
    /// Plain conversational reply for queries that need no corpus work.
    ///
    /// Degrades to static copy when the backend is missing or failing.
    pub async fn simple_response(&self, message: &str, tier: ModelTier) -> String {
        let Some(backend) = self.backend() else {
            return NOT_CONFIGURED_MESSAGE.to_string();
        };

        let model = resolve_model(backend, tier).await;
        let request = CompletionRequest::new(model)
            .message(ChatMessage::system(format!(
                "You are Sahulat AI, a helpful assistant for government program \
discovery in {}. Keep responses concise and helpful.",
                self.country()
            )))
            .message(ChatMessage::user(message))
            .temperature(SIMPLE_TEMPERATURE)
            .max_tokens(SIMPLE_MAX_TOKENS);

        match backend.complete(request).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => APOLOGY_MESSAGE.to_string(),
            Err(e) => {
                warn!(error = %e, "simple response degraded to static copy");
                APOLOGY_MESSAGE.to_string()
            }
        }
    }

    /// Ask the model to pull profile fields out of a message and overlay
    /// them onto the current profile.
    ///
    /// On any failure the profile comes back unchanged together with
    /// deterministic missing-field suggestions.
    pub async fn enhance_profile(
        &self,
        message: &str,
        profile: &UserProfile,
        tier: ModelTier,
    ) -> (UserProfile, Vec<String>) {
        let Some(backend) = self.backend() else {
            return (profile.clone(), Vec::new());
        };

        let profile_json =
            serde_json::to_string(profile).unwrap_or_else(|_| "{}".to_string());
        let prompt = format!(
            "Analyze this user message and extract or update profile information. \
Current profile: {profile_json}

User message: \"{message}\"

Extract any new profile information from the message. Only suggest asking for \
information if it's completely missing and essential for program matching. \
Focus on extracting what the user has already shared.

Respond in JSON:
{{
  \"updatedProfile\": {{ \"age\": 25, \"education\": \"bachelor\" }},
  \"suggestions\": [\"Ask for income level\", \"Ask for occupation\"]
}}"
        );

        let model = resolve_model(backend, tier).await;
        let request = CompletionRequest::new(model)
            .message(ChatMessage::system(
                "You are a profile extraction assistant. Always respond in JSON format.",
            ))
            .message(ChatMessage::user(prompt))
            .temperature(ENHANCE_TEMPERATURE)
            .max_tokens(ENHANCE_MAX_TOKENS)
            .json_output(true);

        let enhancement = match backend.complete(request).await {
            Ok(raw) => response::extract_json_object(&raw)
                .and_then(|block| serde_json::from_str::<ProfileEnhancement>(block).ok()),
            Err(e) => {
                warn!(error = %e, "profile enhancement failed");
                None
            }
        };

        match enhancement {
            Some(enhancement) => {
                let updated = UserProfile::merge(
                    Some(profile.clone()),
                    &enhancement.updated_profile,
                );
                (updated, enhancement.suggestions)
            }
            None => (profile.clone(), basic_profile_suggestions(profile)),
        }
    }
}

/// Deterministic suggestions when enhancement cannot run.
fn basic_profile_suggestions(profile: &UserProfile) -> Vec<String> {
    let mut suggestions = Vec::new();
    if profile.age.is_none() {
        suggestions.push("Please tell us your age".to_string());
    }
    if profile.education.is_none() {
        suggestions.push("What is your education level?".to_string());
    }
    if profile.location.is_none() {
        suggestions.push("Where are you located?".to_string());
    }
    if profile.goals.is_empty() {
        suggestions.push("What type of programs are you looking for?".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Tell us more about yourself to get better recommendations".to_string());
    }
    suggestions
}
