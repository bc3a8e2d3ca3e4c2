use std::collections::BTreeMap;
use std::time::Duration;

/// User agent sent with every request; a fixed realistic browser string
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// A single fetch to perform
///
/// Header keys are case-insensitive (stored lowercased) with last-write-wins
/// semantics. The request is immutable once built; the builder methods
/// consume `self`.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    url: String,
    headers: BTreeMap<String, String>,
    timeout: Duration,
}

impl FetchRequest {
    /// Creates a request for `url` with the default browser header set
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("user-agent".to_string(), DEFAULT_USER_AGENT.to_string());

        Self {
            url: url.into(),
            headers,
            timeout,
        }
    }

    /// Sets a header, replacing any previous value for the same
    /// (case-insensitive) name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
