//! Market data records as served by the Albion Online Data Project.
//!
//! Field names follow the upstream JSON so the records double as wire types.
//! Missing fields fall back to defaults; the upstream omits or zeroes fields
//! for cities without orders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current order-book snapshot for one item in one city.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceQuote {
    pub item_id: String,
    pub city: String,
    pub quality: u8,

    /// Cheapest sell order (0 when there is none)
    pub sell_price_min: u64,
    pub sell_price_min_date: Option<NaiveDateTime>,
    pub sell_price_max: u64,
    pub sell_price_max_date: Option<NaiveDateTime>,

    pub buy_price_min: u64,
    pub buy_price_min_date: Option<NaiveDateTime>,
    /// Best buy order (0 when there is none)
    pub buy_price_max: u64,
    pub buy_price_max_date: Option<NaiveDateTime>,
}

impl PriceQuote {
    pub fn has_sell_orders(&self) -> bool {
        self.sell_price_min > 0
    }

    pub fn has_buy_orders(&self) -> bool {
        self.buy_price_max > 0
    }
}

/// Gold-to-silver exchange rate sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldSample {
    pub timestamp: NaiveDateTime,
    pub price: u64,
}

/// One bucket of trade history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: NaiveDateTime,
    pub avg_price: u64,
    #[serde(default)]
    pub item_count: u64,
}

/// History for one (item, location, quality) as wrapped by the upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySeries {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub quality: u8,
    pub data: Vec<HistoryPoint>,
}
