//! Request coalescing.
//!
//! Concurrent callers asking for the same key share one in-flight
//! computation instead of each running their own.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;
use tokio::sync::OnceCell;

/// Per-key coalescing of async work.
///
/// The first caller for a key becomes the leader and runs the supplied
/// future; callers arriving while it runs wait on the same cell and receive
/// a clone of its output. Once the flight lands the key is released, so a
/// later call starts a fresh flight.
pub struct SingleFlight<V> {
    flights: Mutex<HashMap<String, Arc<OnceCell<V>>>>,
}

impl<V: Clone> SingleFlight<V> {
    pub fn new() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }

    fn lock_flights(&self) -> MutexGuard<'_, HashMap<String, Arc<OnceCell<V>>>> {
        self.flights.lock().unwrap_or_else(|poisoned| {
            warn!("Single-flight mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Run `work` for `key`, or join the flight already running for it.
    ///
    /// If the leader is dropped before finishing, one of the waiters picks
    /// up the work with its own closure.
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        let cell = self
            .lock_flights()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let value = cell.get_or_init(work).await.clone();

        // Only release the slot if it still holds our cell; a newer flight
        // may already occupy it.
        let mut flights = self.lock_flights();
        if flights
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, &cell))
        {
            flights.remove(key);
        }

        value
    }

    /// Number of keys with a flight currently registered.
    pub fn in_flight(&self) -> usize {
        self.lock_flights().len()
    }
}

impl<V: Clone> Default for SingleFlight<V> {
    fn default() -> Self {
        Self::new()
    }
}
