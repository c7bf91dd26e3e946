//! Albion Market Data Crate
//!
//! Item lookup and cached market data access for Albion Online.
//!
//! # Overview
//!
//! The crate has two halves:
//! - Resolution: free-text item names (Korean or English names, colloquial
//!   aliases, raw ids) become canonical item identifiers
//! - Market data: current prices, gold rates and trade history, fetched
//!   from the Albion Online Data Project through a TTL cache
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |   User query     |  "가방", "t4_bag", "Adept's Bag"
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! | ResolutionEngine | --> |   CanonicalId    |  (T4_BAG)
//! |  SearchEngine    |     +------------------+
//! +------------------+              |
//!                                   v
//!                         +-------------------+
//!                         | MarketDataGateway |  (TTL cache + single flight)
//!                         +-------------------+
//!                                   |  miss
//!                                   v
//!                         +-------------------+
//!                         | MarketDataSource  |  (AlbionDataClient)
//!                         +-------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CanonicalId`] - Upstream item identifier
//! - [`ItemIndex`] - Immutable dataset of item names
//! - [`AliasTable`] - Curated phrase to id mapping
//! - [`ResolutionEngine`] - Query to at most one id
//! - [`SearchEngine`] - Keyword to a bounded list of candidates
//! - [`MarketDataGateway`] - Cached price, gold and history fetches

pub mod cache;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod provider;
pub mod resolver;

// Re-export all public types from models
pub use models::{
    AliasEntry, CanonicalId, City, GoldSample, HistoryPoint, HistorySeries, ItemRecord,
    MatchSource, PriceQuote, ProviderId, SearchHit,
};

// Re-export resolver types
pub use resolver::{
    normalize, AliasTable, ItemIndex, ResolutionEngine, ResolutionSource, Resolved, Resolver,
    SearchEngine, DEFAULT_SEARCH_LIMIT,
};

// Re-export cache and gateway types
pub use cache::{CacheStore, Clock, ManualClock, SystemClock};
pub use gateway::{CacheTtlPolicy, Endpoint, GatewayConfig, MarketDataGateway};

// Re-export provider types
pub use provider::{AlbionDataClient, MarketDataSource};

// Re-export error types
pub use errors::{ConfigError, DatasetError, MarketDataError, ResolveError};
