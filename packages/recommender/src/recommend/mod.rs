//! Recommendation orchestration with layered degradation.
//!
//! The per-request state machine:
//!
//! ```text
//! NO_CORPUS  -> CANNED
//! HAS_CORPUS -> AUGMENT -> PROMPT -> MODEL_CALL -> PARSE_OK -> FILTER -> DONE
//!                                               -> ANY_FAILURE -> DETERMINISTIC_FALLBACK -> DONE
//! ```
//!
//! Every terminal state answers with `success = true` except the missing
//! completion credential, which is the pipeline's only hard failure. Web
//! search, the model catalog, the completion call, and response parsing
//! are each allowed to fail independently; any of them failing drops the
//! request into the deterministic fallback tier, which cannot fail.

pub mod prompts;
pub mod response;
pub mod simple;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::completion::{ChatMessage, CompletionBackend, CompletionRequest};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::locale::Locale;
use crate::models::{resolve_model, ModelTier};
use crate::parser::FieldExtractor;
use crate::search::WebSearchService;
use crate::types::{Program, UserProfile};

/// Temperature for the structured recommendation completion.
const RECOMMEND_TEMPERATURE: f32 = 0.3;
/// Output token budget for the recommendation completion.
const RECOMMEND_MAX_TOKENS: u32 = 1000;
/// Confidence reported when the backend omits one.
const DEFAULT_RESPONSE_CONFIDENCE: f32 = 0.8;

/// Keyword sniffing for goal derivation, in priority order.
const GOAL_KEYWORDS: [(&str, &str); 6] = [
    ("scholarship", "scholarship"),
    ("loan", "loan"),
    ("training", "training"),
    ("job", "employment"),
    ("housing", "housing"),
    ("health", "healthcare"),
];

/// Generic goal token when nothing matches.
const GENERIC_GOAL: &str = "government programs";

/// The orchestrator's sole output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub success: bool,
    pub message: String,
    /// Recommended subset of the corpus, in corpus order
    pub programs: Vec<Program>,
    /// Supplementary web links
    pub web_results: Vec<String>,
    /// Missing-field prompts for the user
    pub suggestions: Vec<String>,
    pub confidence: f32,
    /// Degradation tag; present on every non-primary tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Composes extraction, profile state, model selection, web augmentation,
/// and the completion call into one degrading pipeline.
pub struct RecommendationService {
    backend: Option<Arc<dyn CompletionBackend>>,
    search: WebSearchService,
    extractor: FieldExtractor,
    config: PipelineConfig,
}

impl RecommendationService {
    /// Assemble a service from parts. `backend = None` models a missing
    /// completion credential.
    pub fn new(
        backend: Option<Arc<dyn CompletionBackend>>,
        search: WebSearchService,
        config: PipelineConfig,
    ) -> Self {
        let extractor = FieldExtractor::from_config(&config);
        Self {
            backend,
            search,
            extractor,
            config,
        }
    }

    /// Standard wiring from configuration: OpenRouter backend when the
    /// credential is present, Serper/DuckDuckGo search chain.
    #[cfg(feature = "openrouter")]
    pub fn from_config(config: PipelineConfig) -> Self {
        let backend = crate::backend::OpenRouterBackend::from_config(&config)
            .map(|b| Arc::new(b) as Arc<dyn CompletionBackend>);
        let search = WebSearchService::from_config(&config);
        Self::new(backend, search, config)
    }

    /// The field extractor this service uses.
    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub(crate) fn backend(&self) -> Option<&dyn CompletionBackend> {
        self.backend.as_deref()
    }

    pub(crate) fn country(&self) -> &str {
        &self.config.default_country
    }

    /// Produce a recommendation for one message.
    ///
    /// Never panics and, outside the missing-credential case, never
    /// returns `success = false` regardless of corpus and upstream state.
    pub async fn recommend(
        &self,
        message: &str,
        profile: &UserProfile,
        corpus: &[Program],
    ) -> RecommendationResult {
        if corpus.is_empty() {
            info!("corpus empty, answering with categorized overview");
            return self.canned_overview_response();
        }

        let Some(backend) = &self.backend else {
            warn!("completion credential missing, recommendation unavailable");
            return Self::configuration_failure_response();
        };

        match self
            .model_recommendation(backend.as_ref(), message, profile, corpus)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "degrading to deterministic fallback");
                self.fallback_response(corpus)
            }
        }
    }

    /// Parse the message, fold it into the profile, and recommend.
    ///
    /// Convenience composition for callers that hold profile state
    /// between messages; returns the updated profile alongside the
    /// recommendation.
    pub async fn process_message(
        &self,
        message: &str,
        locale: Locale,
        profile: Option<UserProfile>,
        corpus: &[Program],
    ) -> (RecommendationResult, UserProfile) {
        let parsed = self.extractor.extract(message, locale);
        let profile = UserProfile::merge(profile, &parsed);
        let result = self.recommend(message, &profile, corpus).await;
        (result, profile)
    }

    /// AUGMENT -> PROMPT -> MODEL_CALL -> PARSE -> FILTER. Any error here
    /// sends the caller to the deterministic fallback.
    async fn model_recommendation(
        &self,
        backend: &dyn CompletionBackend,
        message: &str,
        profile: &UserProfile,
        corpus: &[Program],
    ) -> Result<RecommendationResult> {
        let goals = derive_goals(message, profile);
        debug!(?goals, corpus_len = corpus.len(), "deriving recommendation context");

        // Best-effort; an outage shows up as zero web results.
        let web = self.search.search_specific_programs(profile, &goals).await;
        if let Some(tag) = &web.error {
            debug!(tag, "continuing without web augmentation");
        }

        let prompt = prompts::recommendation_prompt(
            message,
            profile,
            corpus,
            &web.results,
            &self.config.default_country,
        );

        let model = resolve_model(backend, ModelTier::Chat).await;
        info!(model, "requesting recommendation completion");

        let request = CompletionRequest::new(&model)
            .message(ChatMessage::system(prompts::system_prompt(
                &self.config.default_country,
            )))
            .message(ChatMessage::user(prompt))
            .temperature(RECOMMEND_TEMPERATURE)
            .max_tokens(RECOMMEND_MAX_TOKENS)
            .json_output(true);

        let raw = backend.complete(request).await?;
        let parsed = response::parse_recommendation(&raw)?;

        // Corpus order wins over the backend's ordering.
        let programs: Vec<Program> = corpus
            .iter()
            .filter(|p| parsed.recommended_programs.iter().any(|id| id == &p.id))
            .cloned()
            .collect();

        info!(
            recommended = programs.len(),
            web_links = parsed.web_results.len(),
            "recommendation completed"
        );

        Ok(RecommendationResult {
            success: true,
            message: parsed.message,
            programs,
            web_results: parsed.web_results,
            suggestions: parsed.suggestions,
            confidence: parsed.confidence.unwrap_or(DEFAULT_RESPONSE_CONFIDENCE),
            error: None,
        })
    }

    /// DETERMINISTIC_FALLBACK tier: first three corpus entries, templated
    /// message, fixed suggestions. This path cannot fail.
    fn fallback_response(&self, corpus: &[Program]) -> RecommendationResult {
        let programs: Vec<Program> = corpus
            .iter()
            .take(prompts::FALLBACK_PROGRAM_COUNT)
            .cloned()
            .collect();

        RecommendationResult {
            success: true,
            message: prompts::fallback_message(&programs, &self.config.default_country),
            programs,
            web_results: Vec::new(),
            suggestions: prompts::FALLBACK_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confidence: 0.0,
            error: Some("AI service temporarily unavailable, showing available programs".to_string()),
        }
    }

    /// CANNED tier for an empty corpus.
    fn canned_overview_response(&self) -> RecommendationResult {
        RecommendationResult {
            success: true,
            message: prompts::canned_overview(&self.config.default_country),
            programs: Vec::new(),
            web_results: Vec::new(),
            suggestions: prompts::CANNED_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            confidence: 0.0,
            error: Some("no programs available, providing general information".to_string()),
        }
    }

    /// The only failing terminal state: missing completion credential.
    fn configuration_failure_response() -> RecommendationResult {
        RecommendationResult {
            success: false,
            message: "AI service is not configured. Please contact support.".to_string(),
            programs: Vec::new(),
            web_results: Vec::new(),
            suggestions: Vec::new(),
            confidence: 0.0,
            error: Some("missing API key".to_string()),
        }
    }
}

/// Goal tokens from the profile, else keyword sniffing on the raw
/// message (first match wins), else the generic token.
fn derive_goals(message: &str, profile: &UserProfile) -> Vec<String> {
    if !profile.goals.is_empty() {
        return profile.goals.clone();
    }

    let lowered = message.to_lowercase();
    for (needle, token) in GOAL_KEYWORDS {
        if lowered.contains(needle) {
            return vec![token.to_string()];
        }
    }

    vec![GENERIC_GOAL.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_programs, MockCompletion, MockSearchProvider};
    use crate::types::ParsedAttributes;

    fn search_service() -> WebSearchService {
        WebSearchService::new(
            vec![Arc::new(MockSearchProvider::named("serper"))],
            "Pakistan",
        )
    }

    fn service_with_backend(backend: MockCompletion) -> RecommendationService {
        RecommendationService::new(
            Some(Arc::new(backend)),
            search_service(),
            PipelineConfig::default(),
        )
    }

    fn profile() -> UserProfile {
        UserProfile::merge(None, &ParsedAttributes::default())
    }

    #[test]
    fn test_derive_goals_prefers_profile() {
        let parsed = ParsedAttributes {
            goals: vec!["training".to_string()],
            ..Default::default()
        };
        let profile = UserProfile::merge(None, &parsed);
        assert_eq!(
            derive_goals("I want a scholarship", &profile),
            vec!["training".to_string()]
        );
    }

    #[test]
    fn test_derive_goals_keyword_priority() {
        let profile = profile();
        // "scholarship" outranks "loan" even when both appear.
        assert_eq!(
            derive_goals("a loan or a scholarship?", &profile),
            vec!["scholarship".to_string()]
        );
        assert_eq!(
            derive_goals("I need a job", &profile),
            vec!["employment".to_string()]
        );
        assert_eq!(
            derive_goals("health insurance please", &profile),
            vec!["healthcare".to_string()]
        );
    }

    #[test]
    fn test_derive_goals_generic_fallback() {
        assert_eq!(
            derive_goals("hello there", &profile()),
            vec!["government programs".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_corpus_yields_canned_overview() {
        let service = service_with_backend(MockCompletion::new());

        let result = service.recommend("anything", &profile(), &[]).await;

        assert!(result.success);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.suggestions.len(), 4);
        assert!(result.programs.is_empty());
        assert!(result.message.contains("scholarship"));
        assert!(result.error.is_some());
    }

    #[tokio::test]
    async fn test_missing_credential_is_the_only_failure() {
        let service = RecommendationService::new(
            None,
            search_service(),
            PipelineConfig::default(),
        );

        let result = service
            .recommend("I need help", &profile(), &sample_programs())
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("missing API key"));
    }

    #[tokio::test]
    async fn test_backend_outage_falls_back_to_first_three() {
        let corpus = sample_programs();
        let service = service_with_backend(MockCompletion::new().with_completion_failure());

        let result = service.recommend("I need help", &profile(), &corpus).await;

        assert!(result.success);
        assert!(result.error.is_some());
        assert_eq!(result.programs.len(), 3);
        for program in corpus.iter().take(3) {
            assert!(result.message.contains(&program.title));
        }
        assert_eq!(result.suggestions.len(), 4);
    }

    #[tokio::test]
    async fn test_malformed_backend_output_falls_back() {
        let service = service_with_backend(
            MockCompletion::new().with_response("I am not JSON at all"),
        );

        let result = service
            .recommend("scholarship please", &profile(), &sample_programs())
            .await;

        assert!(result.success);
        assert!(result.error.is_some());
        assert_eq!(result.programs.len(), 3);
    }

    #[tokio::test]
    async fn test_successful_recommendation_filters_in_corpus_order() {
        let corpus = sample_programs();
        // Backend recommends the third and first ids, in that order; the
        // result must follow corpus order instead.
        let response = format!(
            r#"{{"message": "Apply!", "recommendedPrograms": ["{}", "{}"], "webResults": ["https://hec.gov.pk"], "suggestions": ["Share your age"], "confidence": 0.9}}"#,
            corpus[2].id, corpus[0].id
        );
        let service = service_with_backend(MockCompletion::new().with_response(response));

        let result = service
            .recommend("scholarship please", &profile(), &corpus)
            .await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.programs.len(), 2);
        assert_eq!(result.programs[0].id, corpus[0].id);
        assert_eq!(result.programs[1].id, corpus[2].id);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.web_results, vec!["https://hec.gov.pk".to_string()]);
    }

    #[tokio::test]
    async fn test_confidence_defaults_when_backend_omits_it() {
        let corpus = sample_programs();
        let response = format!(
            r#"{{"message": "ok", "recommendedPrograms": ["{}"]}}"#,
            corpus[0].id
        );
        let service = service_with_backend(MockCompletion::new().with_response(response));

        let result = service.recommend("help", &profile(), &corpus).await;

        assert!(result.success);
        assert_eq!(result.confidence, DEFAULT_RESPONSE_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_unknown_recommended_ids_are_ignored() {
        let corpus = sample_programs();
        let response = r#"{"message": "ok", "recommendedPrograms": ["nope-1", "nope-2"]}"#;
        let service =
            service_with_backend(MockCompletion::new().with_response(response.to_string()));

        let result = service.recommend("help", &profile(), &corpus).await;

        assert!(result.success);
        assert!(result.programs.is_empty());
    }

    #[tokio::test]
    async fn test_process_message_merges_profile() {
        let corpus = sample_programs();
        let response = format!(
            r#"{{"message": "ok", "recommendedPrograms": ["{}"]}}"#,
            corpus[0].id
        );
        let service = service_with_backend(MockCompletion::new().with_response(response));

        let (result, profile) = service
            .process_message(
                "I am 25 years old, have a bachelor degree, live in Lahore, looking for scholarship",
                Locale::En,
                None,
                &corpus,
            )
            .await;

        assert!(result.success);
        assert_eq!(profile.age, Some(25));
        assert!(profile.goals.iter().any(|g| g == "scholarship"));
    }

    #[tokio::test]
    async fn test_request_shape_sent_to_backend() {
        let corpus = sample_programs();
        let backend = MockCompletion::new().with_response(
            r#"{"message": "ok", "recommendedPrograms": []}"#.to_string(),
        );
        let calls = backend.call_log();
        let service = service_with_backend(backend);

        service.recommend("scholarship", &profile(), &corpus).await;

        let recorded = calls.read().unwrap();
        assert_eq!(recorded.len(), 1);
        let request = &recorded[0];
        assert_eq!(request.temperature, RECOMMEND_TEMPERATURE);
        assert_eq!(request.max_tokens, RECOMMEND_MAX_TOKENS);
        assert!(request.json_output);
        assert_eq!(request.messages.len(), 2);
        assert!(request.messages[1].content.contains(&corpus[0].title));
    }
}
