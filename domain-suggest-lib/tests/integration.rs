// domain-suggest-lib/tests/integration.rs

//! Integration tests for domain-suggest-lib exports and core functionality.
//!
//! Live-provider behavior is exercised against an unroutable loopback
//! endpoint: every lookup fails fast at the network level, which drives the
//! fallback path without touching any real provider.

use domain_suggest_lib::{
    generate_candidates, paginate, shared_budget, shared_cache, tokenize_keywords,
    AvailabilityChecker, CacheEntry, CheckConfig, DomainResult, ProviderMode,
};
use std::time::Duration;

/// A config whose live lookups fail immediately (connection refused) and
/// whose pacing delays are negligible for test runtime.
fn unroutable_live_config() -> CheckConfig {
    CheckConfig::default()
        .with_api_key("test-key")
        .with_provider_base_url("http://127.0.0.1:9/availability")
        .with_batch_delay(Duration::from_millis(1))
}

#[test]
fn test_generator_pipeline_properties() {
    let words = tokenize_keywords("pet shop");
    let candidates = generate_candidates(&words);

    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.ends_with(".com")));

    let mut unique = candidates.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(candidates.len(), unique.len());

    // "shop" matches the commerce filter
    assert!(candidates.contains(&"petshop.com".to_string()));
    assert!(candidates.contains(&"petstore.com".to_string()));
    assert!(candidates.contains(&"buypet.com".to_string()));
}

#[test]
fn test_single_word_shop_expectations() {
    let candidates = generate_candidates(&tokenize_keywords("shop"));
    for expected in [
        "shop.com",
        "myshop.com",
        "theshop.com",
        "shoponline.com",
        "shopsite.com",
        "shopshop.com",
        "shopstore.com",
    ] {
        assert!(
            candidates.contains(&expected.to_string()),
            "missing expected candidate '{}'",
            expected
        );
    }
}

#[tokio::test]
async fn test_simulated_mode_caps_and_prices() {
    let config = CheckConfig::default();
    let budget = shared_budget(config.max_api_calls, config.budget_window);
    let checker = AvailabilityChecker::new(config, budget, shared_cache()).unwrap();

    let candidates: Vec<String> = (0..15).map(|i| format!("candidate{}.com", i)).collect();
    let results = checker
        .check_domains(&candidates, ProviderMode::Simulated)
        .await;

    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r.available));
    assert!(results.iter().all(|r| r.price >= 8.99 && r.price <= 24.99));
}

#[tokio::test]
async fn test_exhausted_budget_serves_fallback_without_external_calls() {
    // A zero budget means every candidate takes the fallback path; with the
    // unroutable endpoint, any accidental external call would surface as a
    // long hang or a missing fallback price.
    let config = unroutable_live_config().with_max_api_calls(0);
    let default_price = config.default_price;
    let budget = shared_budget(config.max_api_calls, config.budget_window);
    let checker = AvailabilityChecker::new(config, budget.clone(), shared_cache()).unwrap();

    let candidates: Vec<String> = (0..4).map(|i| format!("budgetless{}.com", i)).collect();
    let results = checker.check_domains(&candidates, ProviderMode::Live).await;

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.available));
    assert!(results.iter().all(|r| r.price == default_price));
    assert_eq!(budget.lock().unwrap().remaining(), 0);
}

#[tokio::test]
async fn test_cached_domain_does_not_touch_budget() {
    let config = unroutable_live_config().with_max_api_calls(5);
    let budget = shared_budget(config.max_api_calls, config.budget_window);
    let cache = shared_cache();

    // Pre-populate one positive and one negative outcome
    cache.lock().unwrap().insert_available(DomainResult {
        domain: "cached.com".to_string(),
        available: true,
        price: 12.34,
    });
    cache.lock().unwrap().insert_unavailable("taken.com");

    let checker = AvailabilityChecker::new(config, budget.clone(), cache).unwrap();

    let candidates = vec!["cached.com".to_string(), "taken.com".to_string()];
    for _ in 0..2 {
        let results = checker.check_domains(&candidates, ProviderMode::Live).await;
        // Positive hit is reused; the tombstone contributes nothing
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].domain, "cached.com");
        assert_eq!(results[0].price, 12.34);
    }

    assert_eq!(budget.lock().unwrap().remaining(), 5);
}

#[tokio::test]
async fn test_provider_failure_degrades_to_fallback_and_caches_nothing() {
    let config = unroutable_live_config().with_max_api_calls(10);
    let default_price = config.default_price;
    let budget = shared_budget(config.max_api_calls, config.budget_window);
    let cache = shared_cache();
    let checker = AvailabilityChecker::new(config, budget.clone(), cache.clone()).unwrap();

    let candidates = vec!["unreachable.com".to_string()];
    let results = checker.check_domains(&candidates, ProviderMode::Live).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].available);
    assert_eq!(results[0].price, default_price);

    // Failures are never cached, and the failed call still consumed budget
    assert!(cache.lock().unwrap().is_empty());
    assert_eq!(budget.lock().unwrap().remaining(), 9);
}

#[tokio::test]
async fn test_non_com_candidates_are_skipped_entirely() {
    let config = unroutable_live_config();
    let budget = shared_budget(config.max_api_calls, config.budget_window);
    let checker = AvailabilityChecker::new(config, budget.clone(), shared_cache()).unwrap();

    let candidates = vec!["nothing.org".to_string(), "nope.io".to_string()];
    let results = checker.check_domains(&candidates, ProviderMode::Live).await;

    assert!(results.is_empty());
    assert_eq!(budget.lock().unwrap().remaining(), 100);
}

#[test]
fn test_end_to_end_generate_check_paginate_shape() {
    // Pagination over a synthetic 45-result set
    let results: Vec<DomainResult> = (0..45)
        .map(|i| DomainResult {
            domain: format!("domain{}.com", i),
            available: true,
            price: 30.0 - (i as f64 * 0.5),
        })
        .collect();

    let page1 = paginate(results.clone(), 1, 20);
    assert_eq!(page1.items.len(), 20);
    assert_eq!(page1.pagination.total_pages, 3);
    assert_eq!(page1.pagination.total_domains, 45);

    let page3 = paginate(results, 3, 20);
    assert_eq!(page3.items.len(), 5);

    // Ascending across page boundaries
    assert!(page1.items.last().unwrap().price <= page3.items.first().unwrap().price);
}

#[test]
fn test_cache_entry_shapes_are_inspectable() {
    let cache = shared_cache();
    cache.lock().unwrap().insert_unavailable("gone.com");

    let guard = cache.lock().unwrap();
    assert!(matches!(guard.get("gone.com"), Some(&CacheEntry::Unavailable)));
    assert!(guard.get("never-seen.com").is_none());
}
