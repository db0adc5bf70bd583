//! Main availability checker implementation.
//!
//! This module provides the primary `AvailabilityChecker` struct that takes a
//! list of candidate domains and determines (or assumes) which are available,
//! consulting the shared result cache and rate budget before any external
//! lookup and degrading every failure path to synthesized data.
//!
//! The checker never returns an error: a request-level caller always gets a
//! usable (possibly fabricated) list of available domains back.

use crate::limiter::{CacheEntry, SharedBudget, SharedCache};
use crate::provider::{simulated_price, WhoisLookupClient};
use crate::types::{CheckConfig, DomainResult, ProviderMode};
use crate::utils::is_com_domain;
use futures_util::future::join_all;
use tracing::{debug, warn};

/// Coordinates availability checking for batches of candidate domains.
///
/// Holds the provider client plus shared handles to the process-wide rate
/// budget and result cache. One checker is built at startup and shared by
/// all requests.
///
/// # Example
///
/// ```rust,no_run
/// use domain_suggest_lib::{
///     shared_budget, shared_cache, AvailabilityChecker, CheckConfig, ProviderMode,
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = CheckConfig::default();
///     let budget = shared_budget(config.max_api_calls, config.budget_window);
///     let checker = AvailabilityChecker::new(config, budget, shared_cache())?;
///
///     let candidates = vec!["example.com".to_string()];
///     let results = checker
///         .check_domains(&candidates, ProviderMode::Simulated)
///         .await;
///     println!("{} available", results.len());
///     Ok(())
/// }
/// ```
pub struct AvailabilityChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// Provider client; absent when no API key is configured
    client: Option<WhoisLookupClient>,
    /// Shared lookup budget for the current window
    budget: SharedBudget,
    /// Shared cache of completed lookup outcomes
    cache: SharedCache,
}

impl AvailabilityChecker {
    /// Create a new checker with the given configuration and shared state.
    ///
    /// When the configuration carries no API key the provider client is not
    /// built and live-mode requests degrade to simulation.
    pub fn new(
        config: CheckConfig,
        budget: SharedBudget,
        cache: SharedCache,
    ) -> Result<Self, crate::error::SuggestError> {
        let client = match &config.api_key {
            Some(key) => Some(WhoisLookupClient::new(
                &config.provider_base_url,
                key,
                config.lookup_timeout,
            )?),
            None => None,
        };

        Ok(Self {
            config,
            client,
            budget,
            cache,
        })
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check a list of candidates and return those determined (or assumed)
    /// to be available.
    ///
    /// Non-`.com` candidates are skipped. This method never fails; all
    /// provider and budget problems degrade to synthesized results.
    pub async fn check_domains(
        &self,
        candidates: &[String],
        mode: ProviderMode,
    ) -> Vec<DomainResult> {
        match (mode, &self.client) {
            (ProviderMode::Simulated, _) => self.simulate(candidates),
            (ProviderMode::Live, None) => {
                warn!("live mode requested but no API key configured, simulating instead");
                self.simulate(candidates)
            }
            (ProviderMode::Live, Some(client)) => self.check_live(candidates, client).await,
        }
    }

    /// Fabricate results for the first `simulated_limit` candidates.
    fn simulate(&self, candidates: &[String]) -> Vec<DomainResult> {
        candidates
            .iter()
            .filter(|domain| is_com_domain(domain))
            .take(self.config.simulated_limit)
            .map(|domain| DomainResult {
                domain: domain.clone(),
                available: true,
                price: simulated_price(self.config.simulated_price_range),
            })
            .collect()
    }

    /// Check candidates against the real provider in paced batches.
    async fn check_live(
        &self,
        candidates: &[String],
        client: &WhoisLookupClient,
    ) -> Vec<DomainResult> {
        let com_candidates: Vec<&String> = candidates
            .iter()
            .filter(|domain| is_com_domain(domain))
            .collect();

        let mut results = Vec::new();
        let mut batches = com_candidates.chunks(self.config.batch_size.max(1)).peekable();

        while let Some(batch) = batches.next() {
            let lookups = batch.iter().map(|domain| self.check_one(client, domain));
            let batch_results = join_all(lookups).await;
            results.extend(batch_results.into_iter().flatten());

            // Pause between batches to respect provider rate limits
            if batches.peek().is_some() && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        // The caller must never see a fully empty success from this stage:
        // backfill a few unmodified candidates at default pricing.
        if results.is_empty() {
            debug!(
                candidates = com_candidates.len(),
                "no usable results, backfilling fallback domains"
            );
            results = com_candidates
                .iter()
                .take(self.config.fallback_count)
                .map(|domain| self.fallback(domain))
                .collect();
        }

        results
    }

    /// Check a single domain: cache, then budget, then provider.
    ///
    /// `None` means the domain contributes nothing (known unavailable);
    /// `Some` carries either a real or a synthesized result.
    async fn check_one(
        &self,
        client: &WhoisLookupClient,
        domain: &str,
    ) -> Option<DomainResult> {
        // Cache first: a hit, positive or negative, never touches the budget.
        if let Ok(cache) = self.cache.lock() {
            match cache.get(domain) {
                Some(CacheEntry::Available(result)) => return Some(result.clone()),
                Some(CacheEntry::Unavailable) => return None,
                None => {}
            }
        }

        // A poisoned budget lock counts as exhausted rather than panicking.
        let acquired = match self.budget.lock() {
            Ok(mut budget) => budget.try_acquire(),
            Err(_) => false,
        };
        if !acquired {
            debug!(domain, "lookup budget exhausted, serving fallback");
            return Some(self.fallback(domain));
        }

        match client.lookup(domain).await {
            Ok(outcome) => {
                if outcome.available {
                    let result = DomainResult {
                        domain: domain.to_string(),
                        available: true,
                        price: outcome.price.unwrap_or(self.config.default_price),
                    };
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.insert_available(result.clone());
                    }
                    Some(result)
                } else {
                    if let Ok(mut cache) = self.cache.lock() {
                        cache.insert_unavailable(domain);
                    }
                    None
                }
            }
            Err(e) => {
                if e.indicates_rate_limit() {
                    warn!(domain, "provider rate limit hit, zeroing budget for this window");
                    if let Ok(mut budget) = self.budget.lock() {
                        budget.exhaust();
                    }
                } else {
                    warn!(domain, error = %e, "lookup failed, serving fallback");
                }
                // Failures are never cached; the next window may succeed.
                Some(self.fallback(domain))
            }
        }
    }

    /// Re-label a candidate as available at the default price.
    fn fallback(&self, domain: &str) -> DomainResult {
        DomainResult {
            domain: domain.to_string(),
            available: true,
            price: self.config.default_price,
        }
    }
}
