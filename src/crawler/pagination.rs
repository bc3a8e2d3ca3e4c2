//! Listing-page pagination walk
//!
//! One walk per query, strictly sequential: each page's URL comes from the
//! previous page's next-token, so there is nothing to parallelize here. The
//! walk is an explicit loop over an owned current-page variable with a
//! configurable ceiling, never recursion.

use crate::config::CrawlerConfig;
use crate::crawler::body_snippet;
use crate::crawler::links::LinkSet;
use crate::extract::{PageExtractor, PageToken};
use crate::fetch::{FetchRequest, Fetcher};
use url::Url;

/// Walks the listing pages of one query and accumulates detail links
pub struct LinkCrawler<'a> {
    fetcher: &'a Fetcher,
    extractor: &'a dyn PageExtractor,
    config: &'a CrawlerConfig,
}

impl<'a> LinkCrawler<'a> {
    pub fn new(
        fetcher: &'a Fetcher,
        extractor: &'a dyn PageExtractor,
        config: &'a CrawlerConfig,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    /// Collects all detail-page links for `query`
    ///
    /// Starts at page 1 and follows next-tokens until the site stops
    /// offering one, a page fails, or the page ceiling is reached. A failed
    /// or unparsable page truncates the walk; links gathered so far are
    /// returned, and other queries are unaffected.
    pub async fn crawl(&self, query: &str) -> LinkSet {
        tracing::info!("Loading job links for query '{}'", query);

        let mut links = LinkSet::new();
        let mut page = PageToken(1);
        let mut pages_visited: u32 = 0;

        loop {
            let page_url = match self.listing_url(query, page) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!("Failed to build listing URL for '{}': {}", query, e);
                    break;
                }
            };

            let request = FetchRequest::new(page_url.as_str(), self.config.request_timeout());
            let body = match self.fetcher.fetch(&request).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        "Listing page {} for '{}' failed, ending walk: {}",
                        page.0,
                        query,
                        e
                    );
                    break;
                }
            };

            let listing = match self.extractor.extract_listing(&body, &page_url) {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse listing page {} for '{}': {} (body starts: {})",
                        page.0,
                        query,
                        e,
                        body_snippet(&body)
                    );
                    break;
                }
            };

            pages_visited += 1;

            let mut added = 0;
            for link in listing.links {
                if links.insert(link) {
                    added += 1;
                }
            }
            if added > 0 {
                tracing::info!("Found {} links on page {}", added, page.0);
            } else {
                tracing::warn!("No new links found on page {}", page.0);
            }

            match listing.next_page {
                Some(next) => {
                    if pages_visited >= self.config.max_pages_per_query {
                        tracing::warn!(
                            "Page ceiling ({}) reached for '{}', ending walk at page {}",
                            self.config.max_pages_per_query,
                            query,
                            page.0
                        );
                        break;
                    }
                    if !self.config.page_delay().is_zero() {
                        tokio::time::sleep(self.config.page_delay()).await;
                    }
                    page = next;
                }
                None => {
                    tracing::info!("No more pages to process for '{}'", query);
                    break;
                }
            }
        }

        tracing::info!("Total links found for '{}': {}", query, links.len());
        links
    }

    /// Builds the listing-page URL for `{base}/jobs/search?page={n}&q={query}`
    fn listing_url(&self, query: &str, page: PageToken) -> Result<Url, url::ParseError> {
        let endpoint = format!(
            "{}/jobs/search",
            self.config.base_url.trim_end_matches('/')
        );
        Url::parse_with_params(
            &endpoint,
            &[("page", page.0.to_string()), ("q", query.to_string())],
        )
    }
}
