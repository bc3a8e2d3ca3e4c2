//! Concurrent detail-page pipeline
//!
//! Every link of a LinkSet becomes one task: fetch the detail page, extract
//! the record, append it to the sink. Tasks run concurrently under a
//! semaphore and each resolves to a typed outcome; a failed unit is logged
//! and dropped without touching the others, and the pipeline's totals are
//! computed from the collected outcomes.

use crate::crawler::body_snippet;
use crate::crawler::links::LinkSet;
use crate::extract::PageExtractor;
use crate::fetch::{FetchRequest, Fetcher};
use crate::output::RecordSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// How one link's processing ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkOutcome {
    /// Record extracted and persisted
    Written,
    /// Every fetch strategy failed; no record emitted
    FetchFailed,
    /// Page fetched but the structured data was missing or malformed
    ExtractionFailed,
    /// Record extracted but the sink rejected it
    SinkFailed,
}

/// Accumulated outcome counts for one LinkSet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineTotals {
    /// Links the pipeline was handed
    pub links: usize,
    pub written: usize,
    pub fetch_failures: usize,
    pub extraction_failures: usize,
    pub sink_failures: usize,
}

impl PipelineTotals {
    /// Links that produced no persisted record
    pub fn omissions(&self) -> usize {
        self.fetch_failures + self.extraction_failures + self.sink_failures
    }

    fn record(&mut self, outcome: LinkOutcome) {
        match outcome {
            LinkOutcome::Written => self.written += 1,
            LinkOutcome::FetchFailed => self.fetch_failures += 1,
            LinkOutcome::ExtractionFailed => self.extraction_failures += 1,
            LinkOutcome::SinkFailed => self.sink_failures += 1,
        }
    }
}

/// Fans a LinkSet out over concurrent fetch/extract/persist tasks
pub struct DetailPipeline {
    fetcher: Arc<Fetcher>,
    extractor: Arc<dyn PageExtractor>,
    sink: Arc<dyn RecordSink>,
    max_concurrent: usize,
    request_timeout: Duration,
}

impl DetailPipeline {
    pub fn new(
        fetcher: Arc<Fetcher>,
        extractor: Arc<dyn PageExtractor>,
        sink: Arc<dyn RecordSink>,
        max_concurrent: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            sink,
            max_concurrent,
            request_timeout,
        }
    }

    /// Processes every link and returns the collected totals
    ///
    /// Completion means every per-link task has resolved, successfully or
    /// not. There is no ordering guarantee on sink writes relative to the
    /// LinkSet's order.
    pub async fn process(&self, links: LinkSet) -> PipelineTotals {
        let mut totals = PipelineTotals {
            links: links.len(),
            ..Default::default()
        };

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for link in links {
            let fetcher = Arc::clone(&self.fetcher);
            let extractor = Arc::clone(&self.extractor);
            let sink = Arc::clone(&self.sink);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.request_timeout;

            tasks.spawn(async move {
                // Permit spans the whole unit: fetch, parse, and append
                // count as one concurrency slot
                let _permit = semaphore.acquire_owned().await.ok();
                process_link(&fetcher, extractor.as_ref(), sink.as_ref(), &link, timeout).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => totals.record(outcome),
                Err(e) => tracing::error!("Detail task did not complete: {}", e),
            }
        }

        totals
    }
}

/// Processes a single detail link end to end
async fn process_link(
    fetcher: &Fetcher,
    extractor: &dyn PageExtractor,
    sink: &dyn RecordSink,
    link: &str,
    timeout: Duration,
) -> LinkOutcome {
    tracing::debug!("Getting details for job: {}", link);

    let request = FetchRequest::new(link, timeout);
    let body = match fetcher.fetch(&request).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Dropping link {}: {}", link, e);
            return LinkOutcome::FetchFailed;
        }
    };

    let record = match extractor.extract_detail(&body, link) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(
                "Error getting job details for {}: {} (body starts: {})",
                link,
                e,
                body_snippet(&body)
            );
            return LinkOutcome::ExtractionFailed;
        }
    };

    match sink.append(&record) {
        Ok(()) => {
            tracing::info!("Successfully scraped job: {}", record.title);
            LinkOutcome::Written
        }
        Err(e) => {
            tracing::error!("Failed to persist record for {}: {}", link, e);
            LinkOutcome::SinkFailed
        }
    }
}
