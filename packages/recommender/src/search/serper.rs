//! Serper.dev search provider (Google results, primary).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{SearchProvider, SearchResult};
use crate::config::SecretString;
use crate::error::SearchError;

const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const RESULTS_PER_QUERY: usize = 10;

/// Serper API client.
pub struct SerperClient {
    api_key: SecretString,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperResult>,
}

#[derive(Debug, Deserialize)]
struct SerperResult {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    date: Option<String>,
}

impl SerperClient {
    /// Create a new Serper client.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    fn name(&self) -> &'static str {
        "serper"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let request = SerperRequest {
            q: query,
            num: RESULTS_PER_QUERY,
        };

        let response = self
            .client
            .post(SERPER_ENDPOINT)
            .header("X-API-KEY", self.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(format!(
                "Serper API error {}: {}",
                status, body
            )));
        }

        let serper_response: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        let results = serper_response
            .organic
            .into_iter()
            .map(|r| SearchResult {
                title: r.title,
                link: r.link,
                snippet: r.snippet,
                source: "Google Search".to_string(),
                date: r.date,
            })
            .collect();

        Ok(results)
    }
}
