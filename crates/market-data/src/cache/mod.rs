//! Caching primitives used by the market data gateway.
//!
//! - [`CacheStore`]: keyed values with a per-entry time-to-live
//! - [`SingleFlight`]: coalesces concurrent misses for the same key
//! - [`Clock`]: time source, swappable in tests via [`ManualClock`]

mod clock;
mod single_flight;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use single_flight::SingleFlight;
pub use store::CacheStore;
