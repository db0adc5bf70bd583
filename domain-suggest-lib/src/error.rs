//! Error handling for suggestion and availability operations.
//!
//! This module defines a comprehensive error type that covers the different
//! ways processing can fail, from network issues to invalid input. Note that
//! the availability checker deliberately absorbs most of these and degrades
//! to synthesized data; errors mainly surface from configuration loading and
//! input validation.

use std::fmt;

/// Main error type for domain suggestion operations.
#[derive(Debug, Clone)]
pub enum SuggestError {
    /// Invalid keyword query from the client
    InvalidQuery { reason: String },

    /// Network-related errors (connection, timeout, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Availability-provider specific errors
    ProviderError {
        domain: String,
        message: String,
        status_code: Option<u16>,
    },

    /// JSON parsing errors for provider responses
    ParseError { message: String },

    /// Configuration errors (invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading configuration
    FileError { path: String, message: String },

    /// Rate limiting errors when the provider rejects requests
    RateLimited { service: String, message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl SuggestError {
    /// Create a new invalid query error.
    pub fn invalid_query<R: Into<String>>(reason: R) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new provider error.
    pub fn provider<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::ProviderError {
            domain: domain.into(),
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new provider error with HTTP status code.
    pub fn provider_with_status<D: Into<String>, M: Into<String>>(
        domain: D,
        message: M,
        status_code: u16,
    ) -> Self {
        Self::ProviderError {
            domain: domain.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new parse error.
    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new rate limited error.
    pub fn rate_limited<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::RateLimited {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error signals a rate-limit rejection from the provider.
    ///
    /// The checker zeroes its remaining budget for the window when it sees one.
    pub fn indicates_rate_limit(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::ProviderError {
                    status_code: Some(429),
                    ..
                }
        )
    }
}

impl fmt::Display for SuggestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQuery { reason } => {
                write!(f, "Invalid query: {}", reason)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::ProviderError {
                domain,
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Provider error for '{}' (HTTP {}): {}", domain, code, message)
                } else {
                    write!(f, "Provider error for '{}': {}", domain, message)
                }
            }
            Self::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::RateLimited { service, message } => {
                write!(f, "Rate limited by {}: {}", service, message)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for SuggestError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timed out", err.to_string())
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for SuggestError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}

impl From<std::io::Error> for SuggestError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicates_rate_limit() {
        assert!(SuggestError::rate_limited("whoisfreaks", "quota exceeded").indicates_rate_limit());
        assert!(
            SuggestError::provider_with_status("a.com", "too many requests", 429)
                .indicates_rate_limit()
        );
        assert!(!SuggestError::provider_with_status("a.com", "server error", 500)
            .indicates_rate_limit());
        assert!(!SuggestError::network("connection refused").indicates_rate_limit());
    }

    #[test]
    fn test_display_includes_context() {
        let err = SuggestError::provider_with_status("petshop.com", "bad gateway", 502);
        let msg = err.to_string();
        assert!(msg.contains("petshop.com"));
        assert!(msg.contains("502"));

        let err = SuggestError::file_error("/tmp/config.toml", "not found");
        assert!(err.to_string().contains("/tmp/config.toml"));
    }
}
