//! Upstream market data seam.
//!
//! The gateway only talks to the upstream through [`MarketDataSource`], so
//! tests and alternative transports can stand in for the HTTP client.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{CanonicalId, GoldSample, HistoryPoint, PriceQuote, ProviderId};

/// A source of Albion market data.
///
/// Implementations perform exactly one upstream request per call and report
/// every failure as a [`MarketDataError`]; caching, coalescing and the
/// empty-on-failure policy live in the gateway.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use albion_market_data::provider::MarketDataSource;
///
/// struct Fixture;
///
/// #[async_trait]
/// impl MarketDataSource for Fixture {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     // ... implement fetch methods
/// }
/// ```
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Identifier used in logs and error values, e.g. "ALBION_DATA".
    fn id(&self) -> ProviderId;

    /// Current order-book snapshot for `item` in each of `locations`.
    ///
    /// `locations` are upstream city names ("Fort Sterling", "Caerleon", ...).
    async fn fetch_prices(
        &self,
        item: &CanonicalId,
        locations: &[String],
    ) -> Result<Vec<PriceQuote>, MarketDataError>;

    /// The most recent `count` gold price samples.
    async fn fetch_gold(&self, count: u32) -> Result<Vec<GoldSample>, MarketDataError>;

    /// Trade history buckets for `item` in `location`.
    ///
    /// `time_scale` is the bucket width in hours as understood by the
    /// upstream (1 = hourly, 6 = the default, 24 = daily).
    async fn fetch_history(
        &self,
        item: &CanonicalId,
        location: &str,
        time_scale: u32,
    ) -> Result<Vec<HistoryPoint>, MarketDataError>;
}
