//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: Upstream failures raised by a [`MarketDataSource`](crate::provider::MarketDataSource)
//! - [`ResolveError`]: Why a free-text query did not resolve to an item
//! - [`DatasetError`]: Problems loading the item dataset or alias table
//! - [`ConfigError`]: Invalid gateway configuration

use thiserror::Error;

use crate::models::CanonicalId;

/// Errors that can occur while talking to the upstream market data service.
///
/// The gateway never surfaces these to its callers; they are logged and
/// collapsed into an empty result.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred (non-200 status, transport error).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered 200 but the body could not be parsed.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the body
        provider: String,
        /// Parser error message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Why a query could not be resolved to a single canonical identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No resolution rule matched the query.
    #[error("No item matches '{query}'")]
    NotFound {
        /// The trimmed query
        query: String,
    },

    /// Several items contain the query in their name.
    #[error("'{query}' matches {} items", .candidates.len())]
    Ambiguous {
        /// The trimmed query
        query: String,
        /// Every matching identifier, in dataset order
        candidates: Vec<CanonicalId>,
    },
}

/// Errors raised while building the item index or alias table.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON in the expected shape.
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The same identifier appears twice.
    #[error("Duplicate item id in dataset: {0}")]
    DuplicateId(String),

    /// The same alias phrase appears twice.
    #[error("Duplicate alias phrase: {0}")]
    DuplicateAlias(String),

    /// An alias points at something that is not a canonical identifier.
    #[error("Invalid item id: {0}")]
    InvalidId(String),
}

/// Gateway configuration rejected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL does not parse or is not http(s).
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A timeout or TTL was configured as zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// No default locations configured for price lookups.
    #[error("At least one default location is required")]
    NoDefaultLocations,

    /// An environment value could not be parsed.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// The raw value that failed to parse
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::RateLimited {
            provider: "ALBION_DATA".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: ALBION_DATA");

        let error = MarketDataError::ProviderError {
            provider: "ALBION_DATA".to_string(),
            message: "HTTP error: 502 Bad Gateway".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: ALBION_DATA - HTTP error: 502 Bad Gateway"
        );
    }

    #[test]
    fn test_ambiguous_display_counts_candidates() {
        let error = ResolveError::Ambiguous {
            query: "가방".to_string(),
            candidates: vec![CanonicalId::new("T4_BAG"), CanonicalId::new("T5_BAG")],
        };
        assert_eq!(format!("{}", error), "'가방' matches 2 items");
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::ZeroDuration("ttl.prices").to_string(),
            "ttl.prices must be greater than zero"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                key: "ALBION_CACHE_FAILURES",
                value: "maybe".to_string()
            }
            .to_string(),
            "Invalid value for ALBION_CACHE_FAILURES: maybe"
        );
    }
}
