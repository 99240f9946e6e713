//! Chat Pipeline - Reference Wiring
//!
//! Demonstrates the full message flow: extract attributes from free text,
//! fold them into a profile, and produce a recommendation over a small
//! in-memory corpus.
//!
//! With `OPENROUTER_API_KEY` set (and optionally `SERPER_API_KEY`), the
//! live backends are used; without it, the run shows the deterministic
//! degradation tiers instead, which is itself the pipeline's contract.
//!
//! ```bash
//! cargo run --example chat_pipeline
//! ```

use recommender::{
    store::{MemoryProgramStore, ProgramStore},
    testing::sample_programs,
    Locale, PipelineConfig, RecommendationService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender=debug".into()),
        )
        .init();

    let config = PipelineConfig::from_env();
    let service = RecommendationService::from_config(config);

    let store = MemoryProgramStore::with_programs(sample_programs());
    let corpus = store.all_programs().await?;

    let messages = [
        "I am 25 years old, have a bachelor degree, live in Lahore, looking for scholarship",
        "I also need a loan to start a small business",
    ];

    let mut profile = None;
    for message in messages {
        println!("\n>>> {message}");
        let (result, updated) = service
            .process_message(message, Locale::En, profile, &corpus)
            .await;

        println!("success: {}", result.success);
        println!("confidence: {:.2}", result.confidence);
        if let Some(tag) = &result.error {
            println!("degraded: {tag}");
        }
        println!("{}", result.message);
        for program in &result.programs {
            println!("  -> {} ({})", program.title, program.category.as_str());
        }
        for suggestion in &result.suggestions {
            println!("  ? {suggestion}");
        }

        profile = Some(updated);
    }

    if let Some(profile) = profile {
        println!("\nfinal profile: {}", serde_json::to_string_pretty(&profile)?);
    }

    Ok(())
}
