//! Configuration Module
//!
//! Each exercise reads its own section from environment variables, falling
//! back to the values the exercise was written for.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Reads `name` from the environment, using `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// == Crawler ==
/// Settings for the throttled crawler.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    pub start_url: String,
    /// Maximum crawl depth
    pub depth: usize,
    /// Minimum gap between two new branches
    pub interval: Duration,
}

impl CrawlerConfig {
    /// # Environment Variables
    /// - `CRAWL_START_URL` (default: https://golang.org/)
    /// - `CRAWL_DEPTH` (default: 4)
    /// - `CRAWL_INTERVAL_MS` (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            start_url: env_or("CRAWL_START_URL", defaults.start_url),
            depth: env_or("CRAWL_DEPTH", defaults.depth),
            interval: Duration::from_millis(env_or("CRAWL_INTERVAL_MS", 1000)),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "https://golang.org/".to_string(),
            depth: 4,
            interval: Duration::from_secs(1),
        }
    }
}

// == Pipeline ==
/// Settings for the producer/consumer pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Simulated latency of each stream read
    pub stream_latency: Duration,
    /// Simulated processing time per item on the consumer side
    pub process_delay: Duration,
}

impl PipelineConfig {
    /// # Environment Variables
    /// - `STREAM_LATENCY_MS` (default: 320)
    /// - `PROCESS_DELAY_MS` (default: 330)
    pub fn from_env() -> Self {
        Self {
            stream_latency: Duration::from_millis(env_or("STREAM_LATENCY_MS", 320)),
            process_delay: Duration::from_millis(env_or("PROCESS_DELAY_MS", 330)),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stream_latency: Duration::from_millis(320),
            process_delay: Duration::from_millis(330),
        }
    }
}

// == Cache ==
/// Settings for the LRU cache and the mock server that drives it.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held in the cache
    pub capacity: usize,
    /// Simulated latency of a backing-store load
    pub load_latency: Duration,
    /// Number of concurrent mock clients
    pub clients: usize,
    /// Requests issued by each mock client
    pub requests_per_client: usize,
}

impl CacheConfig {
    /// # Environment Variables
    /// - `CACHE_CAPACITY` (default: 100)
    /// - `LOAD_LATENCY_MS` (default: 10)
    /// - `MOCK_CLIENTS` (default: 20)
    /// - `MOCK_REQUESTS` (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            load_latency: Duration::from_millis(env_or("LOAD_LATENCY_MS", 10)),
            clients: env_or("MOCK_CLIENTS", defaults.clients),
            requests_per_client: env_or("MOCK_REQUESTS", defaults.requests_per_client),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: crate::cache::DEFAULT_CAPACITY,
            load_latency: Duration::from_millis(10),
            clients: 20,
            requests_per_client: 50,
        }
    }
}

// == Budget ==
/// Settings for the time-limited request service.
#[derive(Debug, Clone)]
pub struct BudgetConfig {
    /// Wall-clock limit for a single request
    pub max_request_time: Duration,
    /// Accumulated usage after which free users are rejected
    pub free_tier_limit: Duration,
}

impl BudgetConfig {
    /// # Environment Variables
    /// - `MAX_REQUEST_SECS` (default: 10)
    /// - `FREE_TIER_SECS` (default: 10)
    pub fn from_env() -> Self {
        Self {
            max_request_time: Duration::from_secs(env_or("MAX_REQUEST_SECS", 10)),
            free_tier_limit: Duration::from_secs(env_or("FREE_TIER_SECS", 10)),
        }
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_request_time: Duration::from_secs(10),
            free_tier_limit: Duration::from_secs(10),
        }
    }
}

// == Shutdown ==
/// Settings for the graceful shutdown exercise.
#[derive(Debug, Clone)]
pub struct ShutdownConfig {
    /// How long the mock process takes to stop gracefully
    pub stop_delay: Duration,
}

impl ShutdownConfig {
    /// # Environment Variables
    /// - `STOP_DELAY_SECS` (default: 3)
    pub fn from_env() -> Self {
        Self {
            stop_delay: Duration::from_secs(env_or("STOP_DELAY_SECS", 3)),
        }
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            stop_delay: Duration::from_secs(3),
        }
    }
}

// == Session ==
/// Settings for the session manager and its sweeper.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions idle for longer than this are removed
    pub expiry: Duration,
    /// Period of the background sweep
    pub sweep_interval: Duration,
}

impl SessionConfig {
    /// # Environment Variables
    /// - `SESSION_EXPIRY_SECS` (default: 5)
    /// - `SWEEP_INTERVAL_SECS` (default: 1)
    pub fn from_env() -> Self {
        Self {
            expiry: Duration::from_secs(env_or("SESSION_EXPIRY_SECS", 5)),
            sweep_interval: Duration::from_secs(env_or("SWEEP_INTERVAL_SECS", 1)),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry: Duration::from_secs(5),
            sweep_interval: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_exercise_constants() {
        let crawler = CrawlerConfig::default();
        assert_eq!(crawler.depth, 4);
        assert_eq!(crawler.interval, Duration::from_secs(1));

        let cache = CacheConfig::default();
        assert_eq!(cache.capacity, 100);

        let budget = BudgetConfig::default();
        assert_eq!(budget.max_request_time, Duration::from_secs(10));
        assert_eq!(budget.free_tier_limit, Duration::from_secs(10));

        let session = SessionConfig::default();
        assert_eq!(session.expiry, Duration::from_secs(5));
        assert_eq!(session.sweep_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("CONCURRENCY_EXERCISES_TEST_GARBAGE", "not-a-number");
        let value: u64 = env_or("CONCURRENCY_EXERCISES_TEST_GARBAGE", 7);
        assert_eq!(value, 7);
        env::remove_var("CONCURRENCY_EXERCISES_TEST_GARBAGE");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("CONCURRENCY_EXERCISES_TEST_DEPTH", "9");
        let value: usize = env_or("CONCURRENCY_EXERCISES_TEST_DEPTH", 4);
        assert_eq!(value, 9);
        env::remove_var("CONCURRENCY_EXERCISES_TEST_DEPTH");
    }
}
