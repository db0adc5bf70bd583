//! Rate budget and result cache for availability lookups.
//!
//! Both structures are shared across requests as explicit injected state:
//! the server owns one `SharedBudget` and one `SharedCache` and hands clones
//! to every checker. The budget bounds external lookups per wall-clock
//! window; the cache remembers every lookup outcome (positive and negative)
//! for the lifetime of the process and is never evicted.

use crate::types::DomainResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Bounded counter limiting external lookups per reset window.
///
/// Invariant: `0 <= remaining <= max_calls`.
///
/// The window is enforced two ways: `try_acquire` lazily refills when the
/// window has elapsed (keeps library-only users correct), and the server
/// additionally runs a scheduled task calling `reset` on the same period.
#[derive(Debug)]
pub struct RateBudget {
    max_calls: u32,
    remaining: u32,
    window: Duration,
    window_started: Instant,
}

impl RateBudget {
    /// Create a full budget of `max_calls` per `window`.
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            remaining: max_calls,
            window,
            window_started: Instant::now(),
        }
    }

    /// Take one call from the budget.
    ///
    /// Returns `true` and decrements when budget remains; returns `false`
    /// when exhausted. Refills first if the window has elapsed.
    pub fn try_acquire(&mut self) -> bool {
        if self.window_started.elapsed() >= self.window {
            self.reset();
        }
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Zero out the remaining budget for the rest of the window.
    ///
    /// Called when the provider rejects a request with a rate-limit error.
    pub fn exhaust(&mut self) {
        self.remaining = 0;
    }

    /// Refill the budget and restart the window.
    pub fn reset(&mut self) {
        self.remaining = self.max_calls;
        self.window_started = Instant::now();
    }

    /// Calls left in the current window.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the budget has no calls left in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// The configured window length.
    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Outcome of a completed lookup, as remembered by the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEntry {
    /// Domain was available; the full result is reusable as-is
    Available(DomainResult),

    /// Domain was taken — a tombstone so repeat checks skip the provider
    Unavailable,
}

/// Mapping from domain name to its cached lookup outcome.
///
/// Grows unboundedly for the process lifetime; there is no eviction.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached outcome for a domain.
    pub fn get(&self, domain: &str) -> Option<&CacheEntry> {
        self.entries.get(domain)
    }

    /// Remember a positive lookup outcome.
    pub fn insert_available(&mut self, result: DomainResult) {
        self.entries
            .insert(result.domain.clone(), CacheEntry::Available(result));
    }

    /// Remember a negative lookup outcome.
    pub fn insert_unavailable<D: Into<String>>(&mut self, domain: D) {
        self.entries.insert(domain.into(), CacheEntry::Unavailable);
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no outcomes yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide rate budget handle shared between requests.
pub type SharedBudget = Arc<Mutex<RateBudget>>;

/// Process-wide result cache handle shared between requests.
pub type SharedCache = Arc<Mutex<ResultCache>>;

/// Construct a shared budget handle.
pub fn shared_budget(max_calls: u32, window: Duration) -> SharedBudget {
    Arc::new(Mutex::new(RateBudget::new(max_calls, window)))
}

/// Construct a shared cache handle.
pub fn shared_cache() -> SharedCache {
    Arc::new(Mutex::new(ResultCache::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(domain: &str, price: f64) -> DomainResult {
        DomainResult {
            domain: domain.to_string(),
            available: true,
            price,
        }
    }

    #[test]
    fn test_budget_decrements_to_zero() {
        let mut budget = RateBudget::new(3, Duration::from_secs(3600));
        assert!(budget.try_acquire());
        assert!(budget.try_acquire());
        assert!(budget.try_acquire());
        assert!(!budget.try_acquire());
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_budget_exhaust_zeroes_remaining() {
        let mut budget = RateBudget::new(10, Duration::from_secs(3600));
        assert!(budget.try_acquire());
        budget.exhaust();
        assert!(!budget.try_acquire());
        assert_eq!(budget.remaining(), 0);
    }

    #[test]
    fn test_budget_reset_refills() {
        let mut budget = RateBudget::new(2, Duration::from_secs(3600));
        budget.exhaust();
        budget.reset();
        assert_eq!(budget.remaining(), 2);
        assert!(budget.try_acquire());
    }

    #[test]
    fn test_budget_lazy_refill_after_window() {
        let mut budget = RateBudget::new(1, Duration::from_millis(10));
        assert!(budget.try_acquire());
        assert!(!budget.try_acquire());

        std::thread::sleep(Duration::from_millis(20));
        // Window elapsed: acquisition refills before decrementing
        assert!(budget.try_acquire());
    }

    #[test]
    fn test_budget_zero_max_never_acquires() {
        let mut budget = RateBudget::new(0, Duration::from_secs(3600));
        assert!(!budget.try_acquire());
        budget.reset();
        assert!(!budget.try_acquire());
    }

    #[test]
    fn test_cache_positive_and_negative_entries() {
        let mut cache = ResultCache::new();
        assert!(cache.is_empty());

        cache.insert_available(result("free.com", 9.99));
        cache.insert_unavailable("taken.com");

        assert_eq!(cache.len(), 2);
        match cache.get("free.com") {
            Some(CacheEntry::Available(r)) => assert_eq!(r.price, 9.99),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert_eq!(cache.get("taken.com"), Some(&CacheEntry::Unavailable));
        assert!(cache.get("unseen.com").is_none());
    }

    #[test]
    fn test_cache_overwrites_existing_entry() {
        let mut cache = ResultCache::new();
        cache.insert_unavailable("flip.com");
        cache.insert_available(result("flip.com", 12.50));
        assert_eq!(cache.len(), 1);
        assert!(matches!(
            cache.get("flip.com"),
            Some(CacheEntry::Available(_))
        ));
    }
}
