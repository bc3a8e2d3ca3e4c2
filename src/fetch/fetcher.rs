//! Strategy-ordered fetcher
//!
//! The fetcher owns an ordered list of transport strategies and tries them
//! left-to-right per request. The first non-empty body wins; everything else
//! is recorded and the next strategy gets its turn. The fetcher itself never
//! retries a strategy; retry policy belongs to callers.

use crate::fetch::request::FetchRequest;
use crate::fetch::strategy::{
    BareClientStrategy, BrowserTlsStrategy, FetchStrategy, PooledClientStrategy, TransportError,
};
use thiserror::Error;

/// The recorded outcome of one failed strategy attempt
#[derive(Debug, Clone)]
pub struct StrategyFailure {
    /// Name of the strategy that failed
    pub strategy: &'static str,

    /// The transport failure it reported
    pub error: TransportError,
}

/// Errors surfaced by the fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Every strategy failed or returned an empty body; `attempts` carries
    /// the last failure per strategy, in declared order
    #[error("all fetch strategies exhausted for {url}")]
    AllStrategiesExhausted {
        url: String,
        attempts: Vec<StrategyFailure>,
    },
}

/// Multi-strategy HTTP fetcher
pub struct Fetcher {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl Fetcher {
    /// Builds the default strategy stack: browser-grade TLS client, then the
    /// pooled general client, then the bare HTTP/1.1 fallback
    pub fn new() -> Result<Self, FetchError> {
        let pooled =
            PooledClientStrategy::new().map_err(|e| FetchError::ClientBuild(e.to_string()))?;

        Ok(Self {
            strategies: vec![
                Box::new(BrowserTlsStrategy),
                Box::new(pooled),
                Box::new(BareClientStrategy),
            ],
        })
    }

    /// Builds a fetcher with an explicit strategy list (tried in order)
    pub fn with_strategies(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Fetches a URL, trying strategies in declared order
    ///
    /// Returns the first non-empty body. A transport failure or an empty
    /// body moves on to the next strategy; once one strategy succeeds no
    /// later strategy is attempted. If every strategy fails the error
    /// carries one recorded failure per strategy for diagnostics.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<String, FetchError> {
        tracing::debug!("Fetching {}", request.url());

        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            match strategy.fetch(request).await {
                Ok(body) if !body.is_empty() => {
                    tracing::debug!(
                        "Fetched {} via strategy '{}'",
                        url_tail(request.url()),
                        strategy.name()
                    );
                    return Ok(body);
                }
                Ok(_) => {
                    tracing::warn!(
                        "Strategy '{}' returned an empty body for {}",
                        strategy.name(),
                        request.url()
                    );
                    attempts.push(StrategyFailure {
                        strategy: strategy.name(),
                        error: TransportError::empty_body(),
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        "Strategy '{}' failed for {}: {}",
                        strategy.name(),
                        request.url(),
                        error
                    );
                    attempts.push(StrategyFailure {
                        strategy: strategy.name(),
                        error,
                    });
                }
            }
        }

        Err(FetchError::AllStrategiesExhausted {
            url: request.url().to_string(),
            attempts,
        })
    }
}

/// Last path segment of a URL, used to keep log lines short
fn url_tail(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
