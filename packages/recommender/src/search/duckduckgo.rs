//! DuckDuckGo instant-answer provider (secondary, keyless).

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{SearchProvider, SearchResult};
use crate::error::SearchError;

const DDG_ENDPOINT: &str = "https://api.duckduckgo.com/";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_RELATED_TOPICS: usize = 5;

/// DuckDuckGo instant-answer client. Free, no credential.
pub struct DuckDuckGoClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "Abstract", default)]
    abstract_text: String,
    #[serde(rename = "AbstractSource", default)]
    abstract_source: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

/// Related topics can be plain entries or nested category groups; only
/// plain entries carry text we can use.
#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text", default)]
    text: Option<String>,
    #[serde(rename = "FirstURL", default)]
    first_url: Option<String>,
}

impl DuckDuckGoClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .get(DDG_ENDPOINT)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Api(format!(
                "DuckDuckGo API error: {}",
                response.status()
            )));
        }

        let ddg: DdgResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let mut results = Vec::new();

        if !ddg.abstract_text.is_empty() {
            results.push(SearchResult {
                title: ddg.abstract_source,
                link: ddg.abstract_url,
                snippet: ddg.abstract_text,
                source: "DuckDuckGo Instant Answer".to_string(),
                date: None,
            });
        }

        for topic in ddg.related_topics.into_iter().take(MAX_RELATED_TOPICS) {
            if let Some(text) = topic.text {
                let title = text.split(" - ").next().unwrap_or(&text).to_string();
                results.push(SearchResult {
                    title,
                    link: topic.first_url.unwrap_or_default(),
                    snippet: text,
                    source: "DuckDuckGo Related".to_string(),
                    date: None,
                });
            }
        }

        Ok(results)
    }
}
