//! Market data models
//!
//! This module contains the core data types:
//! - `types` - Canonical item identifier (CanonicalId) and ProviderId
//! - `item` - Dataset records (ItemRecord) and curated aliases (AliasEntry)
//! - `quote` - Upstream market records (PriceQuote, GoldSample, HistoryPoint)
//! - `search` - Search result data (SearchHit, MatchSource)
//! - `city` - Market cities and their display names

mod city;
mod item;
mod quote;
mod search;
mod types;

pub use city::City;
pub use item::{AliasEntry, ItemRecord};
pub use quote::{GoldSample, HistoryPoint, HistorySeries, PriceQuote};
pub use search::{MatchSource, SearchHit};
pub use types::{CanonicalId, ProviderId};
