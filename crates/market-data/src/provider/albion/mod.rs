//! Albion Online Data Project provider.
//!
//! Crowd-sourced market data for Albion Online. No API key is required.
//! Three endpoints are used:
//! - `/api/v2/stats/prices/{id}?locations=...` (current order books)
//! - `/api/v2/stats/gold?count=...` (gold price samples)
//! - `/api/v2/stats/history/{id}?locations=...&time-scale=...` (trade history)
//!
//! The provider performs one request per call; there is no retry.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::MarketDataError;
use crate::models::{CanonicalId, GoldSample, HistoryPoint, PriceQuote, ProviderId};
use crate::provider::MarketDataSource;

use self::models::HistoryResponse;

/// Provider ID constant
const PROVIDER_ID: &str = "ALBION_DATA";

/// Asia server. Americas and Europe use the `west.` and `europe.` hosts.
pub const DEFAULT_BASE_URL: &str = "https://east.albion-online-data.com";

/// Default HTTP request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Albion Online Data Project API.
///
/// # Example
///
/// ```ignore
/// use albion_market_data::provider::albion::{AlbionDataClient, DEFAULT_BASE_URL};
///
/// let client = AlbionDataClient::new(DEFAULT_BASE_URL, Duration::from_secs(10));
/// ```
pub struct AlbionDataClient {
    client: Client,
    base_url: String,
}

impl AlbionDataClient {
    /// Create a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn prices_url(&self, item: &CanonicalId, locations: &[String]) -> String {
        let locations = locations
            .iter()
            .map(|location| urlencoding::encode(location).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/api/v2/stats/prices/{}?locations={}",
            self.base_url,
            urlencoding::encode(item.as_str()),
            locations
        )
    }

    fn gold_url(&self, count: u32) -> String {
        format!("{}/api/v2/stats/gold?count={}", self.base_url, count)
    }

    fn history_url(&self, item: &CanonicalId, location: &str, time_scale: u32) -> String {
        format!(
            "{}/api/v2/stats/history/{}?locations={}&time-scale={}",
            self.base_url,
            urlencoding::encode(item.as_str()),
            urlencoding::encode(location),
            time_scale
        )
    }

    fn transport_error(error: reqwest::Error) -> MarketDataError {
        if error.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_ID.to_string(),
            }
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// GET `url` and decode a 200 body as `T`.
    ///
    /// Any status other than 200 is a failure, including other 2xx codes.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MarketDataError> {
        debug!("{}: GET {}", PROVIDER_ID, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP error: {}", status),
            });
        }

        let body = response.text().await.map_err(Self::transport_error)?;

        serde_json::from_str(&body).map_err(|e| MarketDataError::MalformedResponse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataSource for AlbionDataClient {
    fn id(&self) -> ProviderId {
        PROVIDER_ID
    }

    async fn fetch_prices(
        &self,
        item: &CanonicalId,
        locations: &[String],
    ) -> Result<Vec<PriceQuote>, MarketDataError> {
        self.get_json(&self.prices_url(item, locations)).await
    }

    async fn fetch_gold(&self, count: u32) -> Result<Vec<GoldSample>, MarketDataError> {
        self.get_json(&self.gold_url(count)).await
    }

    async fn fetch_history(
        &self,
        item: &CanonicalId,
        location: &str,
        time_scale: u32,
    ) -> Result<Vec<HistoryPoint>, MarketDataError> {
        let response: HistoryResponse = self
            .get_json(&self.history_url(item, location, time_scale))
            .await?;
        Ok(response.into_points())
    }
}
