//! Utility functions for keyword processing and domain handling.
//!
//! This module contains helper functions for keyword tokenization, domain
//! filtering, and price rounding used throughout the library.

/// Split a raw keyword query into lowercase word tokens.
///
/// Tokens are split on whitespace; empty tokens are dropped. The caller is
/// responsible for rejecting queries that produce no tokens at all.
///
/// # Arguments
///
/// * `keywords` - The raw user-supplied query string
///
/// # Returns
///
/// Ordered sequence of lowercase tokens.
pub fn tokenize_keywords(keywords: &str) -> Vec<String> {
    keywords
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.to_string())
        .collect()
}

/// Check whether a candidate is a `.com` domain.
///
/// The generator only emits `.com` candidates, but the checker guards
/// anyway since callers can feed it arbitrary lists.
pub fn is_com_domain(domain: &str) -> bool {
    domain.ends_with(".com")
}

/// Round a currency amount to two decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
