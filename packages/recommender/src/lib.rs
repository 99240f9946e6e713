//! Profile Inference & Degrading Recommendation Pipeline
//!
//! A bilingual (English/Urdu) pipeline that turns free-text messages into
//! structured applicant profiles and government assistance program
//! recommendations, degrading gracefully across three independent
//! external dependencies: the completion provider, the web search
//! providers, and the program corpus.
//!
//! # Design Philosophy
//!
//! **"Always answer something actionable"**
//!
//! - Pattern tables, not parsers: extraction is data-driven regex rules
//!   per (field, locale), so new locales never touch the algorithm
//! - Explicit degradation tiers, not nested error handling: every
//!   upstream failure maps to a named fallback with `success = true`
//! - Trait seams at every network boundary for offline testing
//!
//! # Usage
//!
//! ```rust,ignore
//! use recommender::{Locale, PipelineConfig, RecommendationService, UserProfile};
//!
//! let config = PipelineConfig::from_env();
//! let service = RecommendationService::from_config(config);
//!
//! // One call: extract attributes, fold into the profile, recommend.
//! let (result, profile) = service
//!     .process_message("I am 25, bachelor degree, live in Lahore, need a scholarship",
//!                      Locale::En, None, &corpus)
//!     .await;
//!
//! println!("{}", result.message);
//! ```
//!
//! # Modules
//!
//! - [`parser`] - Locale-aware field extraction and confidence scoring
//! - [`types`] - Attribute, profile, and program value types
//! - [`models`] - Capability tiers and model resolution
//! - [`search`] - Web augmentation with provider fallback
//! - [`recommend`] - The degrading orchestrator
//! - [`store`] - Read-only program store boundary
//! - [`testing`] - Mock implementations for offline tests

pub mod completion;
pub mod config;
pub mod error;
pub mod locale;
pub mod models;
pub mod parser;
pub mod recommend;
pub mod search;
pub mod store;
pub mod testing;
pub mod types;

#[cfg(feature = "openrouter")]
pub mod backend;

// Re-export core types at crate root
pub use completion::{ChatMessage, CompletionBackend, CompletionRequest, Role};
pub use config::{PipelineConfig, SecretString};
pub use error::{CompletionError, RecommendError, Result, SearchError};
pub use locale::Locale;
pub use models::{resolve_model, ModelTier, DEFAULT_MODEL, FALLBACK_MODELS};
pub use parser::{
    missing_field_suggestions, score, FieldExtractor, ParseOutcome, USABLE_CONFIDENCE_THRESHOLD,
};
pub use recommend::{RecommendationResult, RecommendationService};
pub use search::{
    dedup_by_link, DuckDuckGoClient, SearchProvider, SearchResponse, SearchResult, SerperClient,
    WebSearchService,
};
pub use store::{MemoryProgramStore, ProgramStore};
pub use types::{
    EducationLevel, EligibilityCriteria, FundingRange, Gender, GenderEligibility, IncomeLevel,
    Location, ParsedAttributes, Program, ProgramCategory, ProgramFilters, UserProfile,
    ALL_CATEGORIES,
};

#[cfg(feature = "openrouter")]
pub use backend::OpenRouterBackend;
