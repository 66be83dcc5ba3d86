//! Key Store Cache Module
//!
//! Bounded LRU cache in front of a [`Loader`], safe to share between tasks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::cache::{CacheStats, Handle, Loader, RecencyList};
use crate::error::{CacheError, CacheResult};

#[derive(Debug)]
struct Slot {
    value: String,
    handle: Handle,
}

/// Map and recency order; only ever touched through the cache's lock.
#[derive(Debug)]
struct CacheState {
    entries: HashMap<String, Slot>,
    order: RecencyList,
    stats: CacheStats,
}

impl CacheState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
        }
    }

    /// Returns the cached value and marks it most recently used.
    fn promote(&mut self, key: &str) -> Option<String> {
        let slot = self.entries.get(key)?;
        let (handle, value) = (slot.handle, slot.value.clone());
        self.order.move_to_front(handle);
        self.stats.record_hit();
        Some(value)
    }

    /// Inserts a freshly loaded value, evicting the LRU entry when full.
    fn insert(&mut self, key: String, value: String, capacity: usize) -> Option<String> {
        let mut evicted = None;
        if self.entries.len() >= capacity {
            if let Some(old) = self.order.pop_back() {
                self.entries.remove(&old);
                self.stats.record_eviction();
                evicted = Some(old);
            }
        }
        let handle = self.order.push_front(key.clone());
        self.entries.insert(key, Slot { value, handle });
        evicted
    }
}

// == Key Store Cache ==
/// LRU cache for string key-value pairs.
///
/// Every lookup takes the exclusive lock: hits promote, misses load and may
/// evict. The load runs while the lock is held, so concurrent misses on one
/// key load once. Read-only views (`len`, `stats`, `keys_by_recency`) share it.
pub struct KeyStoreCache {
    state: RwLock<CacheState>,
    loader: Arc<dyn Loader>,
    capacity: usize,
}

impl KeyStoreCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries (minimum 1).
    pub fn new(loader: Arc<dyn Loader>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: RwLock::new(CacheState::with_capacity(capacity)),
            loader,
            capacity,
        }
    }

    // == Get ==
    /// Returns the value for `key`, loading it from the backing source on a miss.
    ///
    /// A failed load is reported to this caller only; nothing is cached.
    pub async fn get(&self, key: &str) -> CacheResult<String> {
        // A hit still reorders the recency list, so every lookup needs the exclusive lock.
        let mut state = self.state.write().await;

        if let Some(value) = state.promote(key) {
            return Ok(value);
        }

        state.stats.record_miss();

        let loader = Arc::clone(&self.loader);
        let owned_key = key.to_string();
        let loaded = tokio::task::spawn_blocking(move || loader.load(&owned_key)).await;

        match loaded {
            Ok(Ok(value)) => {
                if let Some(evicted) = state.insert(key.to_string(), value.clone(), self.capacity) {
                    debug!(key, evicted = %evicted, "evicted least recently used entry");
                }
                Ok(value)
            }
            Ok(Err(source)) => {
                state.stats.record_load_failure();
                warn!(key, error = %source, "load failed");
                Err(CacheError::Load {
                    key: key.to_string(),
                    source,
                })
            }
            Err(join_error) => {
                state.stats.record_load_failure();
                error!(key, error = %join_error, "loader task aborted");
                Err(CacheError::LoaderAborted(key.to_string()))
            }
        }
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        self.state.read().await.stats
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of cached keys from most to least recently used.
    pub async fn keys_by_recency(&self) -> Vec<String> {
        let state = self.state.read().await;
        state.order.iter().map(str::to_string).collect()
    }
}
