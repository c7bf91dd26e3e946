//! Cache-aside front for a [`MarketDataSource`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::cache::{CacheStore, Clock, SingleFlight, SystemClock};
use crate::errors::{ConfigError, MarketDataError};
use crate::models::{CanonicalId, City, GoldSample, HistoryPoint, PriceQuote};
use crate::provider::{AlbionDataClient, MarketDataSource};

use super::config::{Endpoint, GatewayConfig};

/// Gold samples requested by [`MarketDataGateway::fetch_gold_default`].
pub const DEFAULT_GOLD_COUNT: u32 = 24;

/// Bucket width used by [`MarketDataGateway::fetch_history_default`].
pub const DEFAULT_HISTORY_TIME_SCALE: u32 = 6;

/// Store and in-flight table for one endpoint.
struct EndpointCache<V> {
    endpoint: Endpoint,
    ttl: Duration,
    store: CacheStore<Vec<V>>,
    flights: SingleFlight<Vec<V>>,
}

impl<V: Clone> EndpointCache<V> {
    fn new(endpoint: Endpoint, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            endpoint,
            ttl,
            store: CacheStore::with_clock(clock),
            flights: SingleFlight::new(),
        }
    }

    /// Serve `key` from the store, or fetch it once for all concurrent callers.
    async fn get_or_fetch<F, Fut>(&self, key: String, cache_failures: bool, fetch: F) -> Vec<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<V>, MarketDataError>>,
    {
        if let Some(hit) = self.store.get(&key) {
            debug!("Cache hit: {}", key);
            return hit;
        }
        debug!("Cache miss: {}", key);

        let key_ref = key.as_str();
        self.flights
            .run(key_ref, move || async move {
                // A flight that landed between our miss and joining may have
                // filled the store already.
                if let Some(hit) = self.store.get(key_ref) {
                    return hit;
                }

                match fetch().await {
                    Ok(values) => {
                        self.store.set(key_ref, values.clone(), self.ttl);
                        values
                    }
                    Err(e) => {
                        warn!("{} fetch failed for '{}': {}", self.endpoint, key_ref, e);
                        if cache_failures {
                            self.store.set(key_ref, Vec::new(), self.ttl);
                        }
                        Vec::new()
                    }
                }
            })
            .await
    }
}

/// Entry counts per endpoint store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayCacheStats {
    pub prices_count: usize,
    pub gold_count: usize,
    pub history_count: usize,
}

impl GatewayCacheStats {
    pub fn total(&self) -> usize {
        self.prices_count + self.gold_count + self.history_count
    }
}

/// Cached access to Albion market data.
///
/// Every fetch returns a plain `Vec`: upstream failures are logged and
/// collapsed to an empty result, so callers cannot tell "no data" from
/// "upstream down". Concurrent requests for the same key share a single
/// upstream call.
///
/// # Example
///
/// ```ignore
/// use albion_market_data::{CanonicalId, GatewayConfig, MarketDataGateway};
///
/// let gateway = MarketDataGateway::albion(GatewayConfig::default())?;
/// let quotes = gateway.fetch_prices_default(&CanonicalId::new("T4_BAG")).await;
/// ```
pub struct MarketDataGateway {
    source: Arc<dyn MarketDataSource>,
    config: GatewayConfig,
    prices: EndpointCache<PriceQuote>,
    gold: EndpointCache<GoldSample>,
    history: EndpointCache<HistoryPoint>,
}

impl MarketDataGateway {
    /// Gateway over the Albion Online Data Project HTTP API.
    pub fn albion(config: GatewayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = AlbionDataClient::new(config.base_url.as_str(), config.request_timeout);
        Self::new(Arc::new(client), config)
    }

    pub fn new(
        source: Arc<dyn MarketDataSource>,
        config: GatewayConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    /// Gateway whose cache expiry follows `clock`.
    pub fn with_clock(
        source: Arc<dyn MarketDataSource>,
        config: GatewayConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let ttl = config.ttl;
        Ok(Self {
            source,
            prices: EndpointCache::new(
                Endpoint::Prices,
                ttl.ttl_for(Endpoint::Prices),
                clock.clone(),
            ),
            gold: EndpointCache::new(Endpoint::Gold, ttl.ttl_for(Endpoint::Gold), clock.clone()),
            history: EndpointCache::new(
                Endpoint::History,
                ttl.ttl_for(Endpoint::History),
                clock,
            ),
            config,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn source_id(&self) -> &'static str {
        self.source.id()
    }

    /// Current prices for `item` in `locations` (upstream city names).
    pub async fn fetch_prices(&self, item: &CanonicalId, locations: &[String]) -> Vec<PriceQuote> {
        let key = format!("{}:{}:{}", Endpoint::Prices, item, locations.join(","));
        self.prices
            .get_or_fetch(key, self.config.cache_failures, || {
                self.source.fetch_prices(item, locations)
            })
            .await
    }

    /// Current prices for `item` in the configured default locations.
    pub async fn fetch_prices_default(&self, item: &CanonicalId) -> Vec<PriceQuote> {
        self.fetch_prices(item, &self.config.default_locations)
            .await
    }

    /// The latest `count` gold price samples.
    pub async fn fetch_gold(&self, count: u32) -> Vec<GoldSample> {
        let key = format!("{}:{}", Endpoint::Gold, count);
        self.gold
            .get_or_fetch(key, self.config.cache_failures, || {
                self.source.fetch_gold(count)
            })
            .await
    }

    pub async fn fetch_gold_default(&self) -> Vec<GoldSample> {
        self.fetch_gold(DEFAULT_GOLD_COUNT).await
    }

    /// Trade history for `item` in `location`, bucketed by `time_scale` hours.
    pub async fn fetch_history(
        &self,
        item: &CanonicalId,
        location: &str,
        time_scale: u32,
    ) -> Vec<HistoryPoint> {
        let key = format!("{}:{}:{}:{}", Endpoint::History, item, location, time_scale);
        self.history
            .get_or_fetch(key, self.config.cache_failures, || {
                self.source.fetch_history(item, location, time_scale)
            })
            .await
    }

    /// Caerleon history at the default time scale.
    pub async fn fetch_history_default(&self, item: &CanonicalId) -> Vec<HistoryPoint> {
        self.fetch_history(item, City::Caerleon.api_name(), DEFAULT_HISTORY_TIME_SCALE)
            .await
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.prices.store.clear();
        self.gold.store.clear();
        self.history.store.clear();
    }

    pub fn cache_stats(&self) -> GatewayCacheStats {
        GatewayCacheStats {
            prices_count: self.prices.store.len(),
            gold_count: self.gold.store.len(),
            history_count: self.history.store.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory source that counts upstream calls.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        failing: AtomicBool,
        delay: Duration,
    }

    impl CountingSource {
        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        async fn enter(&self) -> Result<(), MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(MarketDataError::ProviderError {
                    provider: "COUNTING".to_string(),
                    message: "HTTP error: 503 Service Unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    fn timestamp(hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[async_trait]
    impl MarketDataSource for CountingSource {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        async fn fetch_prices(
            &self,
            item: &CanonicalId,
            locations: &[String],
        ) -> Result<Vec<PriceQuote>, MarketDataError> {
            self.enter().await?;
            Ok(locations
                .iter()
                .map(|city| PriceQuote {
                    item_id: item.to_string(),
                    city: city.clone(),
                    sell_price_min: 1000,
                    ..PriceQuote::default()
                })
                .collect())
        }

        async fn fetch_gold(&self, count: u32) -> Result<Vec<GoldSample>, MarketDataError> {
            self.enter().await?;
            Ok((0..count.min(24))
                .map(|hour| GoldSample {
                    timestamp: timestamp(hour),
                    price: 4000 + u64::from(hour),
                })
                .collect())
        }

        async fn fetch_history(
            &self,
            _item: &CanonicalId,
            _location: &str,
            _time_scale: u32,
        ) -> Result<Vec<HistoryPoint>, MarketDataError> {
            self.enter().await?;
            Ok(vec![HistoryPoint {
                timestamp: timestamp(0),
                avg_price: 2400,
                item_count: 12,
            }])
        }
    }

    fn gateway_with(
        source: Arc<CountingSource>,
        config: GatewayConfig,
    ) -> (Arc<ManualClock>, MarketDataGateway) {
        let clock = Arc::new(ManualClock::new());
        let gateway = MarketDataGateway::with_clock(source, config, clock.clone()).unwrap();
        (clock, gateway)
    }

    fn bag() -> CanonicalId {
        CanonicalId::new("T4_BAG")
    }

    #[tokio::test]
    async fn test_prices_cached_for_ttl() {
        let source = Arc::new(CountingSource::default());
        let (clock, gateway) = gateway_with(source.clone(), GatewayConfig::default());

        let first = gateway.fetch_prices_default(&bag()).await;
        assert_eq!(first.len(), 7);
        assert_eq!(source.calls(), 1);

        clock.advance(Duration::from_secs(179));
        let second = gateway.fetch_prices_default(&bag()).await;
        assert_eq!(second, first);
        assert_eq!(source.calls(), 1);

        clock.advance(Duration::from_secs(1));
        gateway.fetch_prices_default(&bag()).await;
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_keys_include_parameters() {
        let source = Arc::new(CountingSource::default());
        let (_, gateway) = gateway_with(source.clone(), GatewayConfig::default());

        gateway
            .fetch_prices(&bag(), &["Caerleon".to_string()])
            .await;
        gateway
            .fetch_prices(&bag(), &["Martlock".to_string()])
            .await;
        gateway.fetch_gold(24).await;
        gateway.fetch_gold(48).await;
        gateway.fetch_history(&bag(), "Caerleon", 6).await;
        gateway.fetch_history(&bag(), "Caerleon", 24).await;
        assert_eq!(source.calls(), 6);

        let stats = gateway.cache_stats();
        assert_eq!(stats.prices_count, 2);
        assert_eq!(stats.gold_count, 2);
        assert_eq!(stats.history_count, 2);
        assert_eq!(stats.total(), 6);
    }

    #[tokio::test]
    async fn test_endpoint_ttls_differ() {
        let source = Arc::new(CountingSource::default());
        let (clock, gateway) = gateway_with(source.clone(), GatewayConfig::default());

        gateway.fetch_gold_default().await;
        gateway.fetch_history_default(&bag()).await;
        assert_eq!(source.calls(), 2);

        clock.advance(Duration::from_secs(300));
        gateway.fetch_gold_default().await;
        gateway.fetch_history_default(&bag()).await;
        assert_eq!(source.calls(), 3);

        clock.advance(Duration::from_secs(300));
        gateway.fetch_history_default(&bag()).await;
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_misses_coalesce() {
        let source = Arc::new(CountingSource::slow(Duration::from_millis(50)));
        let (_, gateway) = gateway_with(source.clone(), GatewayConfig::default());
        let item = bag();

        let results =
            futures::future::join_all((0..10).map(|_| gateway.fetch_prices_default(&item))).await;

        assert_eq!(source.calls(), 1);
        assert!(results.iter().all(|quotes| quotes.len() == 7));
    }

    #[tokio::test]
    async fn test_failure_returns_empty_and_retries() {
        let source = Arc::new(CountingSource::default());
        source.set_failing(true);
        let (_, gateway) = gateway_with(source.clone(), GatewayConfig::default());

        assert!(gateway.fetch_gold_default().await.is_empty());
        assert_eq!(gateway.cache_stats().gold_count, 0);

        source.set_failing(false);
        assert_eq!(gateway.fetch_gold_default().await.len(), 24);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_cached_failure_suppresses_retry_within_ttl() {
        let source = Arc::new(CountingSource::default());
        source.set_failing(true);
        let config = GatewayConfig {
            cache_failures: true,
            ..GatewayConfig::default()
        };
        let (clock, gateway) = gateway_with(source.clone(), config);

        assert!(gateway.fetch_gold_default().await.is_empty());
        source.set_failing(false);
        assert!(gateway.fetch_gold_default().await.is_empty());
        assert_eq!(source.calls(), 1);

        clock.advance(Duration::from_secs(300));
        assert_eq!(gateway.fetch_gold_default().await.len(), 24);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let source = Arc::new(CountingSource::default());
        let (_, gateway) = gateway_with(source.clone(), GatewayConfig::default());

        gateway.fetch_history_default(&bag()).await;
        gateway.clear_cache();
        assert_eq!(gateway.cache_stats().total(), 0);

        gateway.fetch_history_default(&bag()).await;
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GatewayConfig {
            default_locations: Vec::new(),
            ..GatewayConfig::default()
        };
        let result = MarketDataGateway::new(Arc::new(CountingSource::default()), config);
        assert!(matches!(result, Err(ConfigError::NoDefaultLocations)));
    }

    #[test]
    fn test_albion_gateway_source_id() {
        let gateway = MarketDataGateway::albion(GatewayConfig::default()).unwrap();
        assert_eq!(gateway.source_id(), "ALBION_DATA");
    }
}
