//! Backing source the cache loads missing keys from.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::LoadError;

// == Loader Trait ==
/// Synchronous, possibly slow source of values for [`super::KeyStoreCache`].
pub trait Loader: Send + Sync + 'static {
    /// Loads the value stored under `key`.
    fn load(&self, key: &str) -> Result<String, LoadError>;
}

// == Mock Database ==
/// In-memory stand-in for a slow database.
///
/// Holds `key-0 .. key-{size}` and blocks the calling thread for `latency`
/// on every lookup.
#[derive(Debug)]
pub struct MockDb {
    rows: HashMap<String, String>,
    latency: Duration,
    calls: AtomicU64,
}

impl MockDb {
    pub fn new(size: usize, latency: Duration) -> Self {
        let rows = (0..size)
            .map(|i| (format!("key-{i}"), format!("value-{i}")))
            .collect();
        Self {
            rows,
            latency,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Loader for MockDb {
    fn load(&self, key: &str) -> Result<String, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.rows
            .get(key)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(key.to_string()))
    }
}
