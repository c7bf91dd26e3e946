//! Upstream market data sources.
//!
//! This module contains:
//! - The [`MarketDataSource`] trait the gateway fetches through
//! - [`albion::AlbionDataClient`], the HTTP implementation against the
//!   Albion Online Data Project

pub mod albion;
mod traits;

pub use albion::AlbionDataClient;
pub use traits::MarketDataSource;
