//! Web augmentation: best-effort discovery of supplementary opportunities.
//!
//! Providers are tried in a fixed order (Serper first, DuckDuckGo second);
//! the first one returning a non-empty result wins. Provider failures are
//! absorbed — the service answers with an empty, tagged response rather
//! than a transport error, because web results only ever supplement the
//! corpus.

pub mod duckduckgo;
pub mod serper;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::SearchError;
use crate::types::UserProfile;

pub use duckduckgo::DuckDuckGoClient;
pub use serper::SerperClient;

/// Cap for general and category searches.
const GENERAL_RESULT_CAP: usize = 10;
/// Cap for the latest-opportunities rotation.
const LATEST_RESULT_CAP: usize = 8;

/// A single web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Which provider surfaced this hit
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Outcome of a search: always "successful" from the caller's view.
///
/// `error` carries an explanatory tag when every provider failed or came
/// back empty.
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub error: Option<String>,
}

impl SearchResponse {
    fn empty_with_tag(tag: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            error: Some(tag.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A single external search provider.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short label for logging ("serper", "duckduckgo").
    fn name(&self) -> &'static str;

    /// Run one query. Transport failures surface as errors here and are
    /// absorbed by [`WebSearchService`].
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// Provider-chaining search service with dedup and caps.
pub struct WebSearchService {
    providers: Vec<Arc<dyn SearchProvider>>,
    country: String,
}

impl WebSearchService {
    /// Build from an explicit provider chain (first = primary).
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>, country: impl Into<String>) -> Self {
        Self {
            providers,
            country: country.into(),
        }
    }

    /// Standard chain from configuration: Serper when a key is present,
    /// DuckDuckGo always.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();
        if let Some(key) = &config.serper_api_key {
            providers.push(Arc::new(SerperClient::new(key.clone())));
        }
        providers.push(Arc::new(DuckDuckGoClient::new()));
        Self::new(providers, config.default_country.clone())
    }

    /// Run one query through the provider chain.
    ///
    /// The first provider with a non-empty result wins; errors and empty
    /// results fall through to the next provider.
    pub async fn search(&self, query: &str) -> SearchResponse {
        for provider in &self.providers {
            match provider.search(query).await {
                Ok(results) if !results.is_empty() => {
                    debug!(
                        provider = provider.name(),
                        count = results.len(),
                        query,
                        "web search succeeded"
                    );
                    return SearchResponse {
                        results,
                        error: None,
                    };
                }
                Ok(_) => {
                    debug!(provider = provider.name(), query, "provider returned no results");
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, query, "provider failed");
                }
            }
        }

        SearchResponse::empty_with_tag("no search providers available")
    }

    /// Search for programs matching a user's goals and profile.
    pub async fn search_specific_programs(
        &self,
        profile: &UserProfile,
        goals: &[String],
    ) -> SearchResponse {
        let mut terms = goals.join(" ");
        if let Some(age) = profile.age {
            terms.push_str(&format!(" age {}", age));
        }
        if let Some(education) = profile.education {
            terms.push_str(&format!(" {} education", education.as_str()));
        }
        if let Some(location) = &profile.location {
            terms.push_str(&format!(" {}", location.label()));
        }
        if let Some(occupation) = &profile.occupation {
            terms.push_str(&format!(" {}", occupation));
        }

        let query = format!(
            "{} government programs {} 2025 official website",
            terms, self.country
        );
        self.search(&query).await
    }

    /// Category rotation: four canned queries, merged and capped at 10.
    pub async fn search_by_category(&self, category: &str) -> SearchResponse {
        let queries = vec![
            format!("{} government programs {} 2025", category, self.country),
            format!("{} opportunities {} official website", category, self.country),
            format!("{} grants {} government portal", category, self.country),
            format!("{} scholarships {} latest", category, self.country),
        ];
        self.multi_query(queries, GENERAL_RESULT_CAP).await
    }

    /// Latest-opportunities rotation: four canned queries, capped at 8.
    pub async fn search_latest_opportunities(&self) -> SearchResponse {
        let queries = vec![
            format!("latest government programs {} 2025", self.country),
            format!("new scholarships {} official website", self.country),
            format!("recent government grants {}", self.country),
            format!("government opportunities {} this month", self.country),
        ];
        self.multi_query(queries, LATEST_RESULT_CAP).await
    }

    /// Issue the queries concurrently, concatenate in query order,
    /// dedup by link keeping the first occurrence, truncate to `cap`.
    async fn multi_query(&self, queries: Vec<String>, cap: usize) -> SearchResponse {
        let responses = join_all(queries.iter().map(|q| self.search(q))).await;

        let merged: Vec<SearchResult> = responses
            .into_iter()
            .flat_map(|r| r.results)
            .collect();
        let deduped = dedup_by_link(merged);

        let mut results = deduped;
        results.truncate(cap);

        if results.is_empty() {
            SearchResponse::empty_with_tag("no search providers available")
        } else {
            SearchResponse {
                results,
                error: None,
            }
        }
    }
}

/// Remove duplicate links, keeping the first occurrence.
pub fn dedup_by_link(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = std::collections::HashSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.link.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearchProvider;
    use crate::types::{EducationLevel, Location, ParsedAttributes};

    fn result(link: &str, source: &str) -> SearchResult {
        SearchResult {
            title: format!("Result {}", link),
            link: link.to_string(),
            snippet: "snippet".to_string(),
            source: source.to_string(),
            date: None,
        }
    }

    fn service(providers: Vec<Arc<dyn SearchProvider>>) -> WebSearchService {
        WebSearchService::new(providers, "Pakistan")
    }

    #[tokio::test]
    async fn test_primary_provider_wins() {
        let primary = MockSearchProvider::named("serper")
            .with_results("q", vec![result("https://a.pk", "Google Search")]);
        let secondary = MockSearchProvider::named("duckduckgo")
            .with_results("q", vec![result("https://b.pk", "DuckDuckGo")]);

        let svc = service(vec![Arc::new(primary), Arc::new(secondary)]);
        let response = svc.search("q").await;

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].link, "https://a.pk");
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_fallback_on_primary_error() {
        let primary = MockSearchProvider::named("serper").with_failure();
        let secondary = MockSearchProvider::named("duckduckgo")
            .with_results("q", vec![result("https://b.pk", "DuckDuckGo")]);

        let svc = service(vec![Arc::new(primary), Arc::new(secondary)]);
        let response = svc.search("q").await;

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].source, "DuckDuckGo");
    }

    #[tokio::test]
    async fn test_fallback_on_empty_primary() {
        let primary = MockSearchProvider::named("serper"); // no scripted results
        let secondary = MockSearchProvider::named("duckduckgo")
            .with_results("q", vec![result("https://b.pk", "DuckDuckGo")]);

        let svc = service(vec![Arc::new(primary), Arc::new(secondary)]);
        let response = svc.search("q").await;

        assert_eq!(response.results.len(), 1);
    }

    #[tokio::test]
    async fn test_all_providers_down_yields_tagged_empty() {
        let primary = MockSearchProvider::named("serper").with_failure();
        let secondary = MockSearchProvider::named("duckduckgo").with_failure();

        let svc = service(vec![Arc::new(primary), Arc::new(secondary)]);
        let response = svc.search("q").await;

        assert!(response.is_empty());
        assert_eq!(
            response.error.as_deref(),
            Some("no search providers available")
        );
    }

    #[tokio::test]
    async fn test_dedup_keeps_first_provider_entry() {
        // Both providers answer different queries of the rotation with the
        // same URL; the first occurrence must win.
        let provider = MockSearchProvider::named("serper")
            .with_results(
                "latest government programs Pakistan 2025",
                vec![result("https://dup.pk", "first")],
            )
            .with_results(
                "new scholarships Pakistan official website",
                vec![result("https://dup.pk", "second"), result("https://b.pk", "second")],
            );

        let svc = service(vec![Arc::new(provider)]);
        let response = svc.search_latest_opportunities().await;

        let dup_entries: Vec<_> = response
            .results
            .iter()
            .filter(|r| r.link == "https://dup.pk")
            .collect();
        assert_eq!(dup_entries.len(), 1);
        assert_eq!(dup_entries[0].source, "first");
    }

    #[tokio::test]
    async fn test_latest_cap_is_eight() {
        let results: Vec<SearchResult> = (0..20)
            .map(|i| result(&format!("https://r{}.pk", i), "serper"))
            .collect();
        let provider = MockSearchProvider::named("serper")
            .with_results("latest government programs Pakistan 2025", results);

        let svc = service(vec![Arc::new(provider)]);
        let response = svc.search_latest_opportunities().await;

        assert_eq!(response.results.len(), 8);
    }

    #[tokio::test]
    async fn test_category_cap_is_ten() {
        let results: Vec<SearchResult> = (0..20)
            .map(|i| result(&format!("https://r{}.pk", i), "serper"))
            .collect();
        let provider = MockSearchProvider::named("serper")
            .with_results("scholarship government programs Pakistan 2025", results);

        let svc = service(vec![Arc::new(provider)]);
        let response = svc.search_by_category("scholarship").await;

        assert_eq!(response.results.len(), 10);
    }

    #[tokio::test]
    async fn test_specific_programs_query_shape() {
        let parsed = ParsedAttributes {
            age: Some(25),
            education: Some(EducationLevel::Bachelor),
            location: Some(Location::city("Lahore", "Pakistan")),
            ..Default::default()
        };
        let profile = crate::types::UserProfile::merge(None, &parsed);

        let provider = MockSearchProvider::named("serper").with_results(
            "scholarship age 25 bachelor education Lahore government programs Pakistan 2025 official website",
            vec![result("https://hec.gov.pk", "Google Search")],
        );

        let svc = service(vec![Arc::new(provider)]);
        let response = svc
            .search_specific_programs(&profile, &["scholarship".to_string()])
            .await;

        assert_eq!(response.results.len(), 1);
    }

    #[test]
    fn test_dedup_by_link() {
        let results = vec![
            result("https://a.pk", "one"),
            result("https://b.pk", "one"),
            result("https://a.pk", "two"),
        ];
        let deduped = dedup_by_link(results);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].source, "one");
    }
}
