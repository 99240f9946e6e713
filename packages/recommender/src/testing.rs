//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that use the pipeline without making
//! real completion or search calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::completion::{CompletionBackend, CompletionRequest};
use crate::error::{CompletionError, SearchError};
use crate::search::{SearchProvider, SearchResult};
use crate::types::{FundingRange, Program, ProgramCategory};

/// A mock completion backend with scripted behavior.
///
/// Records every completion request for assertions.
#[derive(Default)]
pub struct MockCompletion {
    response: Option<String>,
    fail_completion: bool,
    available_models: Vec<String>,
    fail_catalog: bool,
    calls: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl MockCompletion {
    /// Create a mock with no scripted response and an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the completion output.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Make every completion call fail with a transport error.
    pub fn with_completion_failure(mut self) -> Self {
        self.fail_completion = true;
        self
    }

    /// Script the model catalog.
    pub fn with_available_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }

    /// Make the catalog endpoint fail with a transport error.
    pub fn with_catalog_failure(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    /// Shared handle to the recorded requests.
    pub fn call_log(&self) -> Arc<RwLock<Vec<CompletionRequest>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CompletionBackend for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if self.fail_completion {
            return Err(CompletionError::Network(
                "mock transport failure".to_string(),
            ));
        }

        self.response
            .clone()
            .ok_or_else(|| CompletionError::Api("no scripted response".to_string()))
    }

    async fn available_models(&self) -> Result<Vec<String>, CompletionError> {
        if self.fail_catalog {
            return Err(CompletionError::Network(
                "mock catalog failure".to_string(),
            ));
        }
        Ok(self.available_models.clone())
    }
}

/// A mock search provider with per-query scripted results.
pub struct MockSearchProvider {
    name: &'static str,
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    fail: bool,
}

impl MockSearchProvider {
    /// Create a named mock provider with no results.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            results: RwLock::new(HashMap::new()),
            fail: false,
        }
    }

    /// Script results for one query.
    pub fn with_results(self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(query.into(), results);
        self
    }

    /// Make every search fail with a transport error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if self.fail {
            return Err(SearchError::Http("mock connection refused".to_string()));
        }
        Ok(self
            .results
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// A small representative corpus for tests and examples.
pub fn sample_programs() -> Vec<Program> {
    vec![
        Program {
            id: "ehsaas-scholarship".to_string(),
            title: "Ehsaas Undergraduate Scholarship".to_string(),
            category: ProgramCategory::Scholarship,
            description: "Need-based scholarship covering tuition and a living stipend \
for undergraduate students"
                .to_string(),
            eligibility_criteria: crate::types::EligibilityCriteria {
                age_min: Some(17),
                age_max: Some(25),
                education_level: vec!["high_school".to_string(), "bachelor".to_string()],
                income_level: vec!["low".to_string()],
                ..Default::default()
            },
            benefits: vec![
                "Full tuition coverage".to_string(),
                "Monthly stipend".to_string(),
            ],
            requirements: vec![
                "Admission in a public university".to_string(),
                "Family income certificate".to_string(),
            ],
            funding_amount: Some(FundingRange {
                min: 50_000,
                max: 200_000,
                currency: "PKR".to_string(),
            }),
            application_deadline: Some("2025-10-31".to_string()),
            application_url: Some("https://ehsaas.gov.pk/scholarship".to_string()),
            is_active: true,
        },
        Program {
            id: "kamyab-jawan-loan".to_string(),
            title: "Kamyab Jawan Youth Loan".to_string(),
            category: ProgramCategory::Loan,
            description: "Subsidized business loans for young entrepreneurs".to_string(),
            eligibility_criteria: crate::types::EligibilityCriteria {
                age_min: Some(21),
                age_max: Some(45),
                ..Default::default()
            },
            benefits: vec!["Low-markup financing up to PKR 5 million".to_string()],
            requirements: vec![
                "CNIC".to_string(),
                "Business plan".to_string(),
            ],
            funding_amount: Some(FundingRange {
                min: 100_000,
                max: 5_000_000,
                currency: "PKR".to_string(),
            }),
            application_deadline: None,
            application_url: Some("https://kamyabjawan.gov.pk".to_string()),
            is_active: true,
        },
        Program {
            id: "navttc-training".to_string(),
            title: "NAVTTC Skills for All".to_string(),
            category: ProgramCategory::SkillTraining,
            description: "Free technical and vocational training with certification"
                .to_string(),
            eligibility_criteria: crate::types::EligibilityCriteria {
                age_min: Some(16),
                age_max: Some(40),
                ..Default::default()
            },
            benefits: vec!["Free training".to_string(), "Certification".to_string()],
            requirements: vec!["Matric certificate".to_string()],
            funding_amount: None,
            application_deadline: Some("2025-12-15".to_string()),
            application_url: Some("https://navttc.gov.pk".to_string()),
            is_active: true,
        },
        Program {
            id: "sehat-card".to_string(),
            title: "Sehat Sahulat Health Card".to_string(),
            category: ProgramCategory::Health,
            description: "Health insurance covering hospitalization for low-income families"
                .to_string(),
            eligibility_criteria: crate::types::EligibilityCriteria {
                income_level: vec!["low".to_string()],
                ..Default::default()
            },
            benefits: vec!["Inpatient coverage up to PKR 1 million per family".to_string()],
            requirements: vec!["CNIC".to_string()],
            funding_amount: None,
            application_deadline: None,
            application_url: Some("https://pmhealthprogram.gov.pk".to_string()),
            is_active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_completion_scripted_response() {
        let mock = MockCompletion::new().with_response("hello");
        let request = CompletionRequest::new("test/model");
        assert_eq!(mock.complete(request).await.unwrap(), "hello");
        assert_eq!(mock.call_log().read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_completion_failure() {
        let mock = MockCompletion::new().with_completion_failure();
        let request = CompletionRequest::new("test/model");
        assert!(mock.complete(request).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_search_provider() {
        let provider = MockSearchProvider::named("serper").with_results(
            "q",
            vec![SearchResult {
                title: "t".to_string(),
                link: "https://x.pk".to_string(),
                snippet: "s".to_string(),
                source: "mock".to_string(),
                date: None,
            }],
        );

        assert_eq!(provider.search("q").await.unwrap().len(), 1);
        assert!(provider.search("other").await.unwrap().is_empty());
    }

    #[test]
    fn test_sample_programs_are_active() {
        let programs = sample_programs();
        assert!(programs.len() >= 3);
        assert!(programs.iter().all(|p| p.is_active));
    }
}
