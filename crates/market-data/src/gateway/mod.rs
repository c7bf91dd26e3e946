//! Cache-aside market data access.
//!
//! [`MarketDataGateway`] sits between callers and a
//! [`MarketDataSource`](crate::provider::MarketDataSource). Each endpoint has
//! its own TTL store, and concurrent misses for the same key share one
//! upstream request.

mod config;
mod gateway;

pub use config::{CacheTtlPolicy, Endpoint, GatewayConfig};
pub use gateway::{
    GatewayCacheStats, MarketDataGateway, DEFAULT_GOLD_COUNT, DEFAULT_HISTORY_TIME_SCALE,
};
