//! LRU cache under concurrent load
//!
//! Many mock clients read through a bounded cache backed by a slow database.

use std::sync::Arc;

use tracing::info;

use concurrency_exercises::cache::{run_mock_server, KeyStoreCache, MockDb};
use concurrency_exercises::{telemetry, CacheConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = CacheConfig::from_env();
    info!(
        "Cache capacity {}, {} clients x {} requests",
        config.capacity, config.clients, config.requests_per_client
    );

    // Twice the capacity, so the working set forces evictions.
    let key_space = config.capacity * 2;
    let db = Arc::new(MockDb::new(key_space, config.load_latency));
    let cache = Arc::new(KeyStoreCache::new(db.clone(), config.capacity));

    let report = run_mock_server(
        Arc::clone(&cache),
        config.clients,
        config.requests_per_client,
        key_space,
    )
    .await;

    let stats = cache.stats().await;
    info!(
        served = report.served,
        failed = report.failed,
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        db_calls = db.calls(),
        hit_rate = stats.hit_rate(),
        "done"
    );
    Ok(())
}
