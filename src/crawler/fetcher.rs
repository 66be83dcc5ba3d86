//! Page sources for the crawler.

use std::collections::HashMap;

use crate::error::FetchError;

/// A fetched page: its body and the links found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub body: String,
    pub urls: Vec<String>,
}

// == Fetcher Trait ==
pub trait Fetcher: Send + Sync + 'static {
    /// Returns the body of `url` and the URLs found on that page.
    fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

// == Mock Fetcher ==
/// Canned web of a few Go documentation pages.
///
/// `https://golang.org/cmd/` is linked but missing, so every crawl also
/// exercises the error path.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    pages: HashMap<String, Page>,
}

impl MockFetcher {
    pub fn new() -> Self {
        let site = [
            (
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"][..],
            ),
            (
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ][..],
            ),
            (
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"][..],
            ),
            (
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"][..],
            ),
        ];

        let pages = site
            .into_iter()
            .map(|(url, body, links)| {
                let page = Page {
                    body: body.to_string(),
                    urls: links.iter().map(|l| l.to_string()).collect(),
                };
                (url.to_string(), page)
            })
            .collect();

        Self { pages }
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fetcher_known_page() {
        let fetcher = MockFetcher::new();
        let page = fetcher.fetch("https://golang.org/pkg/fmt/").unwrap();
        assert_eq!(page.body, "Package fmt");
        assert_eq!(page.urls.len(), 2);
    }

    #[test]
    fn test_mock_fetcher_missing_page() {
        let fetcher = MockFetcher::new();
        assert_eq!(
            fetcher.fetch("https://golang.org/cmd/"),
            Err(FetchError::NotFound("https://golang.org/cmd/".to_string()))
        );
    }
}
