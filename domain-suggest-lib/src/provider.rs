//! Availability-provider client and response normalization.
//!
//! The external provider is consumed as a black-box HTTP endpoint that takes
//! an API key and a domain and returns an availability indicator plus an
//! optional price. Providers have drifted between several response shapes
//! over time, so everything provider-specific is isolated behind one
//! normalization function and the rest of the library only ever sees
//! [`LookupOutcome`].

use crate::error::SuggestError;
use crate::utils::round_to_cents;
use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;

/// Normalized result of one provider lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    /// Whether the provider reports the domain as unregistered
    pub available: bool,

    /// Provider-reported yearly price, when present
    pub price: Option<f64>,
}

/// HTTP client for the external availability endpoint.
#[derive(Clone)]
pub struct WhoisLookupClient {
    /// HTTP client for availability requests
    http_client: reqwest::Client,
    /// Base URL of the availability endpoint
    base_url: String,
    /// API key sent with every request
    api_key: String,
}

impl WhoisLookupClient {
    /// Create a new lookup client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Availability endpoint, without query parameters
    /// * `api_key` - Provider API key
    /// * `timeout` - Per-request timeout
    pub fn new<U: Into<String>, K: Into<String>>(
        base_url: U,
        api_key: K,
        timeout: Duration,
    ) -> Result<Self, SuggestError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                SuggestError::network_with_source(
                    "Failed to create availability HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Query the provider for one domain.
    ///
    /// # Errors
    ///
    /// Returns `SuggestError` if:
    /// - The request fails at the network level
    /// - The provider responds with a non-success status (429 maps to
    ///   `RateLimited` so the checker can zero its budget)
    /// - The response body is not valid JSON
    pub async fn lookup(&self, domain: &str) -> Result<LookupOutcome, SuggestError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("apiKey", self.api_key.as_str()), ("domain", domain)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SuggestError::rate_limited(
                "availability provider",
                format!("lookup for '{}' rejected", domain),
            ));
        }
        if !status.is_success() {
            return Err(SuggestError::provider_with_status(
                domain,
                "non-success response",
                status.as_u16(),
            ));
        }

        let body: serde_json::Value = response.json().await?;
        Ok(normalize_response(&body))
    }
}

/// Translate a provider response body into a [`LookupOutcome`].
///
/// Tolerates the availability shapes seen in the wild:
/// - `{"status": "available"}`
/// - `{"domainAvailability": true}` or `{"domainAvailability": "available"}`
/// - `{"available": true}`
///
/// Anything else is treated as unavailable. The price may arrive as a JSON
/// number or a numeric string; it is rounded to cents either way.
pub fn normalize_response(body: &serde_json::Value) -> LookupOutcome {
    let available = body["status"].as_str() == Some("available")
        || body["domainAvailability"].as_bool() == Some(true)
        || body["domainAvailability"].as_str() == Some("available")
        || body["available"].as_bool() == Some(true);

    let price = match &body["price"] {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| *p >= 0.0)
    .map(round_to_cents);

    LookupOutcome { available, price }
}

/// Synthesize a pseudo-random price within the configured simulated range.
pub fn simulated_price(range: (f64, f64)) -> f64 {
    let (low, high) = range;
    if high <= low {
        return round_to_cents(low);
    }
    let mut rng = rand::rng();
    round_to_cents(rng.random_range(low..high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_status_string_shape() {
        let outcome = normalize_response(&json!({"status": "available", "price": 12.49}));
        assert!(outcome.available);
        assert_eq!(outcome.price, Some(12.49));

        let outcome = normalize_response(&json!({"status": "registered"}));
        assert!(!outcome.available);
    }

    #[test]
    fn test_normalize_domain_availability_shapes() {
        let outcome = normalize_response(&json!({"domainAvailability": true}));
        assert!(outcome.available);

        let outcome = normalize_response(&json!({"domainAvailability": "available"}));
        assert!(outcome.available);

        let outcome = normalize_response(&json!({"domainAvailability": "unavailable"}));
        assert!(!outcome.available);
    }

    #[test]
    fn test_normalize_plain_available_flag() {
        let outcome = normalize_response(&json!({"available": true}));
        assert!(outcome.available);

        let outcome = normalize_response(&json!({"available": false}));
        assert!(!outcome.available);
    }

    #[test]
    fn test_normalize_empty_body_is_unavailable() {
        let outcome = normalize_response(&json!({}));
        assert!(!outcome.available);
        assert_eq!(outcome.price, None);
    }

    #[test]
    fn test_normalize_price_as_string() {
        let outcome = normalize_response(&json!({"status": "available", "price": "14.999"}));
        assert_eq!(outcome.price, Some(15.0));
    }

    #[test]
    fn test_normalize_unparseable_price_dropped() {
        let outcome = normalize_response(&json!({"status": "available", "price": "call us"}));
        assert_eq!(outcome.price, None);
    }

    #[test]
    fn test_normalize_negative_price_dropped() {
        let outcome = normalize_response(&json!({"status": "available", "price": -3.0}));
        assert_eq!(outcome.price, None);
    }

    #[test]
    fn test_simulated_price_stays_in_range() {
        for _ in 0..100 {
            let price = simulated_price((8.99, 24.99));
            assert!((8.99..=24.99).contains(&price), "price {} out of range", price);
            // Two-decimal precision
            assert_eq!(price, round_to_cents(price));
        }
    }

    #[test]
    fn test_simulated_price_degenerate_range() {
        assert_eq!(simulated_price((9.99, 9.99)), 9.99);
        assert_eq!(simulated_price((9.99, 5.0)), 9.99);
    }
}
