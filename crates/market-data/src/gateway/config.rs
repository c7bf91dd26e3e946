//! Gateway configuration.
//!
//! Every cache lifetime is an explicit, named field. Configurations are
//! checked once by [`GatewayConfig::validate`] when the gateway is built.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::errors::ConfigError;
use crate::models::City;
use crate::provider::albion::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};

/// Upstream operations the gateway caches separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Prices,
    Gold,
    History,
}

impl Endpoint {
    /// Prefix of the cache keys for this endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Prices => "prices",
            Endpoint::Gold => "gold",
            Endpoint::History => "history",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-to-live per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlPolicy {
    pub prices: Duration,
    pub gold: Duration,
    pub history: Duration,
}

impl CacheTtlPolicy {
    pub fn ttl_for(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::Prices => self.prices,
            Endpoint::Gold => self.gold,
            Endpoint::History => self.history,
        }
    }
}

impl Default for CacheTtlPolicy {
    fn default() -> Self {
        Self {
            prices: Duration::from_secs(180),
            gold: Duration::from_secs(300),
            history: Duration::from_secs(600),
        }
    }
}

/// Settings for [`MarketDataGateway`](super::MarketDataGateway).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Upstream root, without the `/api/v2` path.
    pub base_url: String,
    pub request_timeout: Duration,
    pub ttl: CacheTtlPolicy,
    /// Cache empty results after an upstream failure for the endpoint TTL.
    ///
    /// Off by default: a failed lookup is retried on the next request.
    pub cache_failures: bool,
    /// Locations queried by `fetch_prices_default`.
    pub default_locations: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ttl: CacheTtlPolicy::default(),
            cache_failures: false,
            default_locations: City::all_api_names(),
        }
    }
}

impl GatewayConfig {
    /// Reject configurations the gateway cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        let durations = [
            ("request_timeout", self.request_timeout),
            ("ttl.prices", self.ttl.prices),
            ("ttl.gold", self.ttl.gold),
            ("ttl.history", self.ttl.history),
        ];
        if let Some((name, _)) = durations.into_iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::ZeroDuration(name));
        }

        if self.default_locations.is_empty() {
            return Err(ConfigError::NoDefaultLocations);
        }

        Ok(())
    }

    /// Build a configuration from `ALBION_*` environment variables.
    ///
    /// Unset variables keep their defaults. Set but malformed values are
    /// reported, never replaced by a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("ALBION_API_BASE_URL") {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "ALBION_REQUEST_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "ALBION_TTL_PRICES_SECS")? {
            config.ttl.prices = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "ALBION_TTL_GOLD_SECS")? {
            config.ttl.gold = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "ALBION_TTL_HISTORY_SECS")? {
            config.ttl.history = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("ALBION_CACHE_FAILURES") {
            config.cache_failures = parse_flag(&flag).ok_or(ConfigError::InvalidValue {
                key: "ALBION_CACHE_FAILURES",
                value: flag,
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
