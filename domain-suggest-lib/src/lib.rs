//! # Domain Suggest Library
//!
//! Keyword-driven domain name suggestions with provider-backed availability
//! checks, a process-wide lookup budget, an in-memory result cache, and
//! price-ranked pagination.
//!
//! This library provides the core logic behind the domain-suggest HTTP API:
//! a pure candidate generator, a defensive availability checker that always
//! degrades to usable data, and a ranker/paginator for the results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_suggest_lib::{
//!     generate_candidates, paginate, shared_budget, shared_cache, tokenize_keywords,
//!     AvailabilityChecker, CheckConfig, ProviderMode,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CheckConfig::default();
//!     let budget = shared_budget(config.max_api_calls, config.budget_window);
//!     let checker = AvailabilityChecker::new(config, budget, shared_cache())?;
//!
//!     let words = tokenize_keywords("pet shop");
//!     let candidates = generate_candidates(&words);
//!     let results = checker
//!         .check_domains(&candidates, ProviderMode::Simulated)
//!         .await;
//!     let page = paginate(results, 1, 20);
//!
//!     for result in &page.items {
//!         println!("{} — ${:.2}/yr", result.domain, result.price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Candidate generation**: template-based `.com` suggestions from keywords
//! - **Availability checking**: external WHOIS-data provider or simulation
//! - **Rate budget**: bounded external lookups per wall-clock window
//! - **Result cache**: lookup outcomes reused for the process lifetime
//! - **Degrade-to-data**: provider failures become plausible fallback results

// Re-export main public API types and functions
pub use checker::AvailabilityChecker;
pub use config::{
    build_check_config, load_env_config, parse_duration_string, ConfigManager, EnvConfig,
    FileConfig, GenerationConfig,
};
pub use error::SuggestError;
pub use generate::{generate_candidates, generate_candidates_with_extras};
pub use limiter::{
    shared_budget, shared_cache, CacheEntry, RateBudget, ResultCache, SharedBudget, SharedCache,
};
pub use paginate::paginate;
pub use provider::{normalize_response, simulated_price, LookupOutcome, WhoisLookupClient};
pub use types::{CheckConfig, DomainResult, Pagination, ProviderMode, SuggestionPage};
pub use utils::tokenize_keywords;

// Internal modules
mod checker;
mod config;
mod error;
mod generate;
mod limiter;
mod paginate;
mod provider;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SuggestError>;

// Library version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
