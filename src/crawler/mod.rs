//! Crawler Module
//!
//! Concurrent, depth-limited crawl where every new branch must pass a shared
//! [`Throttle`] before it is spawned.

mod fetcher;
mod throttle;

pub use fetcher::{Fetcher, MockFetcher, Page};
pub use throttle::Throttle;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

type BranchFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Totals for one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub pages_found: usize,
    pub fetch_errors: usize,
}

/// State shared by every branch of one crawl.
struct CrawlShared {
    fetcher: Arc<dyn Fetcher>,
    throttle: Throttle,
    pages_found: AtomicUsize,
    fetch_errors: AtomicUsize,
}

// == Crawler ==
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    interval: Duration,
}

impl Crawler {
    /// `interval` is the minimum gap between two newly started branches.
    pub fn new(fetcher: Arc<dyn Fetcher>, interval: Duration) -> Self {
        Self { fetcher, interval }
    }

    /// Crawls from `url` down to `depth` levels and waits for every branch.
    pub async fn crawl(&self, url: &str, depth: usize) -> CrawlReport {
        let shared = Arc::new(CrawlShared {
            fetcher: Arc::clone(&self.fetcher),
            throttle: Throttle::new(self.interval),
            pages_found: AtomicUsize::new(0),
            fetch_errors: AtomicUsize::new(0),
        });

        // Each branch owns a sender; recv() yields None once the last one is dropped.
        let (done_tx, mut done_rx) = mpsc::channel::<()>(1);
        crawl_branch(url.to_string(), depth, Arc::clone(&shared), done_tx).await;
        let _ = done_rx.recv().await;

        CrawlReport {
            pages_found: shared.pages_found.load(Ordering::SeqCst),
            fetch_errors: shared.fetch_errors.load(Ordering::SeqCst),
        }
    }
}

fn crawl_branch(
    url: String,
    depth: usize,
    shared: Arc<CrawlShared>,
    done: mpsc::Sender<()>,
) -> BranchFuture {
    Box::pin(async move {
        if depth == 0 {
            return;
        }

        // Fetches are synchronous and may be slow; keep them off the runtime workers.
        let fetcher = Arc::clone(&shared.fetcher);
        let target = url.clone();
        let fetched = tokio::task::spawn_blocking(move || fetcher.fetch(&target)).await;

        let page = match fetched {
            Ok(Ok(page)) => page,
            Ok(Err(err)) => {
                warn!(error = %err, "fetch failed");
                shared.fetch_errors.fetch_add(1, Ordering::SeqCst);
                return;
            }
            Err(join_error) => {
                error!(url = %url, error = %join_error, "fetch task aborted");
                shared.fetch_errors.fetch_add(1, Ordering::SeqCst);
                return;
            }
        };

        shared.pages_found.fetch_add(1, Ordering::SeqCst);
        info!(url = %url, body = ?page.body, "found");

        for child in page.urls {
            shared.throttle.wait().await;
            tokio::spawn(crawl_branch(
                child,
                depth - 1,
                Arc::clone(&shared),
                done.clone(),
            ));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::Instant;

    use crate::error::FetchError;

    /// Wraps the mock web and records when each fetch started.
    struct RecordingFetcher {
        inner: MockFetcher,
        started: Mutex<Vec<Instant>>,
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, url: &str) -> Result<Page, FetchError> {
            self.started.lock().unwrap().push(Instant::now());
            self.inner.fetch(url)
        }
    }

    /// Blocks for `latency` per fetch and tracks how many fetches overlap.
    struct SlowFetcher {
        inner: MockFetcher,
        latency: Duration,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Fetcher for SlowFetcher {
        fn fetch(&self, url: &str) -> Result<Page, FetchError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(self.latency);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.inner.fetch(url)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_visits_every_page_within_depth() {
        let crawler = Crawler::new(Arc::new(MockFetcher::new()), Duration::from_secs(1));

        let report = crawler.crawl("https://golang.org/", 4).await;

        assert_eq!(report, CrawlReport { pages_found: 10, fetch_errors: 3 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_depth_zero_fetches_nothing() {
        let crawler = Crawler::new(Arc::new(MockFetcher::new()), Duration::from_secs(1));

        let report = crawler.crawl("https://golang.org/", 0).await;

        assert_eq!(report, CrawlReport::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_branches_start_at_most_once_per_interval() {
        let fetcher = Arc::new(RecordingFetcher {
            inner: MockFetcher::new(),
            started: Mutex::new(Vec::new()),
        });
        let crawler = Crawler::new(fetcher.clone(), Duration::from_secs(1));

        crawler.crawl("https://golang.org/", 4).await;

        let mut started = fetcher.started.lock().unwrap().clone();
        started.sort();
        assert_eq!(started.len(), 13);
        for pair in started.windows(2) {
            assert!(
                pair[1] - pair[0] >= Duration::from_millis(999),
                "branches started {:?} apart",
                pair[1] - pair[0]
            );
        }
    }

    // Single-threaded runtime: overlap is only possible if fetches leave the worker.
    #[tokio::test]
    async fn test_slow_fetches_overlap() {
        let fetcher = Arc::new(SlowFetcher {
            inner: MockFetcher::new(),
            latency: Duration::from_millis(300),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let crawler = Crawler::new(fetcher.clone(), Duration::from_millis(50));

        let report = crawler.crawl("https://golang.org/", 3).await;

        assert_eq!(report.pages_found + report.fetch_errors, 7);
        assert!(
            fetcher.peak.load(Ordering::SeqCst) > 1,
            "fetches never overlapped"
        );
        assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
    }
}
