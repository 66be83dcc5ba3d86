//! Throttled crawler
//!
//! Crawls the mock Go documentation site concurrently while starting at most
//! one new branch per interval.

use std::sync::Arc;

use tracing::info;

use concurrency_exercises::crawler::{Crawler, MockFetcher};
use concurrency_exercises::{telemetry, CrawlerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = CrawlerConfig::from_env();
    info!(
        "Crawling {} to depth {} with one new branch every {:?}",
        config.start_url, config.depth, config.interval
    );

    let crawler = Crawler::new(Arc::new(MockFetcher::new()), config.interval);
    let report = crawler.crawl(&config.start_url, config.depth).await;

    info!(
        pages = report.pages_found,
        errors = report.fetch_errors,
        "crawl complete"
    );
    Ok(())
}
