//! Request handlers for the domain-suggest API.
//!
//! The suggestion handler is deliberately defensive: besides the one client
//! error (empty keywords), every processing problem degrades into a
//! successful response carrying plausible data rather than a 5xx. A panic
//! anywhere in the pipeline is contained and answered with a best-effort
//! fallback list at default pricing.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_suggest_lib::{
    generate_candidates_with_extras, paginate, tokenize_keywords, DomainResult, Pagination,
    ProviderMode, SuggestionPage,
};
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

/// Body of a POST /api/domain-suggestions request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Raw keyword query, split on whitespace server-side
    pub keywords: String,

    /// 1-based page number; defaults to the first page
    #[serde(default)]
    pub page: Option<usize>,

    /// Provider selector ("simulated" or "live"); unknown values fall back
    /// to the configured default
    #[serde(default)]
    pub api_provider: Option<String>,
}

/// Body of a suggestion response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// One page of available domains, sorted by ascending price
    pub domains: Vec<DomainResult>,

    /// Pagination metadata for the full result set
    pub pagination: Pagination,

    /// Human-readable note for empty or degraded responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Present and true when results were fabricated without external calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_mode: Option<bool>,
}

/// POST /api/domain-suggestions
pub async fn domain_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> Response {
    let keywords = request.keywords.trim().to_string();
    if keywords.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Keywords are required. Enter some keywords or a description." })),
        )
            .into_response();
    }

    let config = state.checker.config();
    let mode = request
        .api_provider
        .as_deref()
        .and_then(ProviderMode::parse)
        .unwrap_or(config.default_mode);
    let page = request.page.unwrap_or(1).max(1);

    info!(%keywords, page, %mode, "handling suggestion request");

    let outcome = AssertUnwindSafe(run_suggestion(&state, &keywords, page, mode))
        .catch_unwind()
        .await;

    match outcome {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(_) => {
            error!(%keywords, "suggestion pipeline panicked, serving best-effort fallback");
            let response = best_effort_response(&state, &keywords, page);
            (StatusCode::OK, Json(response)).into_response()
        }
    }
}

/// The normal pipeline: tokenize, generate, check, paginate.
async fn run_suggestion(
    state: &AppState,
    keywords: &str,
    page: usize,
    mode: ProviderMode,
) -> SuggestionResponse {
    let config = state.checker.config();

    let words = tokenize_keywords(keywords);
    let candidates =
        generate_candidates_with_extras(&words, &config.extra_prefixes, &config.extra_suffixes);
    let results = state.checker.check_domains(&candidates, mode).await;

    // Simulation happens either on request or because live mode has no key
    let simulated = mode == ProviderMode::Simulated || config.api_key.is_none();
    let demo_mode = simulated.then_some(true);

    if results.is_empty() {
        return SuggestionResponse {
            domains: Vec::new(),
            pagination: Pagination::empty(),
            message: Some("No available .com domains found. Try different keywords.".to_string()),
            demo_mode,
        };
    }

    let SuggestionPage { items, pagination } = paginate(results, page, config.page_size);

    SuggestionResponse {
        domains: items,
        pagination,
        message: None,
        demo_mode,
    }
}

/// Fallback shape for a panicked pipeline: the raw candidate list re-labeled
/// as available at the default price.
fn best_effort_response(state: &AppState, keywords: &str, page: usize) -> SuggestionResponse {
    let config = state.checker.config();

    let words = tokenize_keywords(keywords);
    let results: Vec<DomainResult> =
        generate_candidates_with_extras(&words, &config.extra_prefixes, &config.extra_suffixes)
            .into_iter()
            .map(|domain| DomainResult {
                domain,
                available: true,
                price: config.default_price,
            })
            .collect();

    let SuggestionPage { items, pagination } = paginate(results, page, config.page_size);

    SuggestionResponse {
        domains: items,
        pagination,
        message: Some(
            "Availability could not be verified; showing estimated suggestions.".to_string(),
        ),
        demo_mode: Some(true),
    }
}

/// GET /api/test
pub async fn api_test() -> Json<serde_json::Value> {
    Json(json!({ "message": "API is working!" }))
}

/// GET /api/hello
pub async fn hello() -> &'static str {
    "Hello World!"
}
