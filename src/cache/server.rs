//! Mock server that hammers a [`KeyStoreCache`] from many concurrent clients.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cache::KeyStoreCache;

/// Totals reported by [`run_mock_server`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerReport {
    pub served: usize,
    pub failed: usize,
}

/// Spawns `clients` tasks that each issue `requests` lookups.
///
/// Keys are spread over `key_space` so that clients overlap on some keys and
/// the working set exceeds the cache capacity.
pub async fn run_mock_server(
    cache: Arc<KeyStoreCache>,
    clients: usize,
    requests: usize,
    key_space: usize,
) -> ServerReport {
    let key_space = key_space.max(1);
    let mut set = JoinSet::new();

    for client in 0..clients {
        let cache = Arc::clone(&cache);
        set.spawn(async move {
            let mut report = ServerReport::default();
            for i in 0..requests {
                let key = format!("key-{}", (client * 31 + i * 17) % key_space);
                match cache.get(&key).await {
                    Ok(_) => report.served += 1,
                    Err(err) => {
                        warn!(client, key = %key, error = %err, "request failed");
                        report.failed += 1;
                    }
                }
            }
            debug!(client, served = report.served, "client finished");
            report
        });
    }

    let mut total = ServerReport::default();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(report) => {
                total.served += report.served;
                total.failed += report.failed;
            }
            Err(err) => warn!(error = %err, "client task panicked"),
        }
    }

    info!(served = total.served, failed = total.failed, "mock server finished");
    total
}
