//! Cache Statistics Module
//!
//! Counts hits, loads, evictions and load failures of a [`super::KeyStoreCache`].

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to call the loader
    pub misses: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Loader calls that returned an error
    pub load_failures: u64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_load_failure(&mut self) {
        self.load_failures += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_failures_and_evictions_counted_separately() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_load_failure();
        stats.record_eviction();

        assert_eq!(stats.misses, 1);
        assert_eq!(stats.load_failures, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.hits, 0);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["load_failures"], 0);
    }
}
