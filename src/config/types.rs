use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Zipharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Search terms to harvest, one full listing walk per entry
    pub queries: Vec<String>,

    pub crawler: CrawlerConfig,

    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Base URL of the job-listing site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Ceiling on listing pages visited for one query; guards against a
    /// "next" link that cycles
    #[serde(rename = "max-pages-per-query", default = "default_max_pages")]
    pub max_pages_per_query: u32,

    /// Delay between listing-page fetches of one query (milliseconds)
    #[serde(rename = "page-delay-ms", default)]
    pub page_delay_ms: u64,

    /// Maximum number of detail pages fetched concurrently
    #[serde(rename = "max-concurrent-details", default = "default_concurrency")]
    pub max_concurrent_details: u32,

    /// Per-request timeout applied to every fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout")]
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Destination file for job records; the extension selects the sink
    /// backend (.db/.sqlite/.sqlite3 or .json/.jsonl/.ndjson)
    #[serde(rename = "records-path")]
    pub records_path: String,
}

fn default_max_pages() -> u32 {
    1000
}

fn default_concurrency() -> u32 {
    8
}

fn default_timeout() -> u64 {
    30
}

impl CrawlerConfig {
    /// The per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The inter-page politeness delay as a Duration
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}
