//! Defensive parsing of the completion backend's output.
//!
//! Backends asked for JSON still wrap it in prose or code fences often
//! enough that we scan for the first top-level `{...}` block (greedy, so
//! nested objects stay intact) before attempting a structural parse.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::RecommendError;

lazy_static! {
    // Greedy: first '{' through the last '}', matching across newlines.
    static ref JSON_OBJECT_RE: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// The JSON shape the recommendation prompt requests.
#[derive(Debug, Clone, Deserialize)]
pub struct AIRecommendation {
    pub message: String,

    #[serde(default, rename = "recommendedPrograms")]
    pub recommended_programs: Vec<String>,

    #[serde(default, rename = "webResults")]
    pub web_results: Vec<String>,

    #[serde(default)]
    pub suggestions: Vec<String>,

    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Locate the first top-level JSON object in raw text.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(raw).map(|m| m.as_str())
}

/// Parse the backend's raw text into an [`AIRecommendation`].
pub fn parse_recommendation(raw: &str) -> Result<AIRecommendation, RecommendError> {
    let block = extract_json_object(raw).ok_or_else(|| {
        RecommendError::MalformedResponse("no JSON object in completion output".to_string())
    })?;

    serde_json::from_str(block)
        .map_err(|e| RecommendError::MalformedResponse(format!("invalid recommendation JSON: {e}")))
}
