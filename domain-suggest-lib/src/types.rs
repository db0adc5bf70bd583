//! Core data types for domain suggestion and availability checking.
//!
//! This module defines all the main data structures used throughout the library,
//! including domain results, pagination metadata, and configuration options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of an availability check for a single candidate domain.
///
/// Only available domains are surfaced to callers; unavailable ones are
/// dropped by the checker before results leave the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainResult {
    /// The domain name that was checked (e.g., "example.com")
    pub domain: String,

    /// Whether the domain is available for registration.
    /// Always `true` for results returned by the checker; the field is
    /// kept on the wire because the presentation layer renders it.
    pub available: bool,

    /// Yearly registration price in USD, rounded to cents. Non-negative.
    pub price: f64,
}

/// Pagination metadata returned alongside a page of results.
///
/// Derived from the full result set, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number of the returned slice
    pub current_page: usize,

    /// Total number of pages, at least 1 even for an empty result set
    pub total_pages: usize,

    /// Total number of results across all pages
    pub total_domains: usize,
}

impl Pagination {
    /// Metadata for an empty result set: a single empty page.
    pub fn empty() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_domains: 0,
        }
    }
}

/// One page of ranked results plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionPage {
    /// The results on this page, sorted by ascending price
    pub items: Vec<DomainResult>,

    /// Derived pagination metadata
    pub pagination: Pagination,
}

/// Which availability provider a check should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderMode {
    /// Fabricate availability and prices without any external call
    #[serde(rename = "simulated")]
    Simulated,

    /// Query the external WHOIS-data provider, subject to budget and cache
    #[serde(rename = "live")]
    Live,
}

impl ProviderMode {
    /// Parse a provider selector string as sent by API clients.
    ///
    /// Returns `None` for unknown values so the caller can fall back to
    /// its configured default instead of rejecting the request.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "simulated" | "demo" | "mock" => Some(Self::Simulated),
            "live" | "whoisfreaks" | "real" => Some(Self::Live),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Simulated => write!(f, "simulated"),
            ProviderMode::Live => write!(f, "live"),
        }
    }
}

/// Configuration options for suggestion and availability checking.
///
/// This struct allows fine-tuning of the checking behavior, including
/// pagination, rate budget, batching, and provider preferences.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Which provider to use when a request doesn't select one
    /// Default: Simulated (no external calls without explicit opt-in)
    pub default_mode: ProviderMode,

    /// Number of results per page
    /// Default: 20, Range: 1-100
    pub page_size: usize,

    /// Maximum number of candidates synthesized in simulated mode
    /// Default: 10
    pub simulated_limit: usize,

    /// Price range for simulated results, in USD
    /// Default: 8.99 to 24.99
    pub simulated_price_range: (f64, f64),

    /// Price used when the provider reports no price, and for fallback results
    /// Default: 9.99
    pub default_price: f64,

    /// How many external lookups run concurrently within one request
    /// Default: 5
    pub batch_size: usize,

    /// Pause inserted between lookup batches to respect provider rate limits
    /// Default: 1 second
    pub batch_delay: Duration,

    /// Maximum external lookups per budget window
    /// Default: 100
    pub max_api_calls: u32,

    /// Wall-clock period after which the rate budget refills
    /// Default: 1 hour
    pub budget_window: Duration,

    /// How many candidates are backfilled when a check yields zero results
    /// Default: 3
    pub fallback_count: usize,

    /// Timeout for each external availability lookup
    /// Default: 5 seconds
    pub lookup_timeout: Duration,

    /// Base URL of the availability endpoint
    pub provider_base_url: String,

    /// API key for the availability provider; live mode degrades to
    /// simulated when no key is configured
    pub api_key: Option<String>,

    /// Additional creative prefixes appended to the built-in list
    pub extra_prefixes: Vec<String>,

    /// Additional creative suffixes appended to the built-in list
    pub extra_suffixes: Vec<String>,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// The defaults mirror the provider's documented rate limits and keep
    /// the system usable without any external credentials.
    fn default() -> Self {
        Self {
            default_mode: ProviderMode::Simulated,
            page_size: 20,
            simulated_limit: 10,
            simulated_price_range: (8.99, 24.99),
            default_price: 9.99,
            batch_size: 5,
            batch_delay: Duration::from_secs(1),
            max_api_calls: 100,
            budget_window: Duration::from_secs(3600),
            fallback_count: 3,
            lookup_timeout: Duration::from_secs(5),
            provider_base_url: "https://api.whoisfreaks.com/v1.0/domain/availability".to_string(),
            api_key: None,
            extra_prefixes: Vec::new(),
            extra_suffixes: Vec::new(),
        }
    }
}

impl CheckConfig {
    /// Set the provider mode used when requests don't select one.
    pub fn with_default_mode(mut self, mode: ProviderMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Set the page size. Automatically clamped to 1-100.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }

    /// Set the maximum external lookups per budget window.
    pub fn with_max_api_calls(mut self, max_api_calls: u32) -> Self {
        self.max_api_calls = max_api_calls;
        self
    }

    /// Set the budget refill period.
    pub fn with_budget_window(mut self, window: Duration) -> Self {
        self.budget_window = window;
        self
    }

    /// Set the concurrent lookup batch width. Clamped to 1-20.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, 20);
        self
    }

    /// Set the pause between lookup batches.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Set the provider API key.
    pub fn with_api_key<K: Into<String>>(mut self, key: K) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the provider endpoint base URL.
    pub fn with_provider_base_url<U: Into<String>>(mut self, url: U) -> Self {
        self.provider_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.simulated_limit, 10);
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.max_api_calls, 100);
        assert_eq!(config.default_mode, ProviderMode::Simulated);
    }

    #[test]
    fn test_page_size_clamped() {
        let config = CheckConfig::default().with_page_size(500);
        assert_eq!(config.page_size, 100);

        let config = CheckConfig::default().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_provider_mode_parse() {
        assert_eq!(ProviderMode::parse("simulated"), Some(ProviderMode::Simulated));
        assert_eq!(ProviderMode::parse("Demo"), Some(ProviderMode::Simulated));
        assert_eq!(ProviderMode::parse("live"), Some(ProviderMode::Live));
        assert_eq!(ProviderMode::parse("whoisfreaks"), Some(ProviderMode::Live));
        assert_eq!(ProviderMode::parse("  LIVE "), Some(ProviderMode::Live));
        assert_eq!(ProviderMode::parse("carrier-pigeon"), None);
        assert_eq!(ProviderMode::parse(""), None);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::empty();
        assert_eq!(p.current_page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_domains, 0);
    }

    #[test]
    fn test_domain_result_serializes_to_wire_shape() {
        let result = DomainResult {
            domain: "example.com".to_string(),
            available: true,
            price: 9.99,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["available"], true);
        assert_eq!(json["price"], 9.99);
    }

    #[test]
    fn test_pagination_serializes_camel_case() {
        let json = serde_json::to_value(Pagination::empty()).unwrap();
        assert!(json.get("currentPage").is_some());
        assert!(json.get("totalPages").is_some());
        assert!(json.get("totalDomains").is_some());
    }
}
