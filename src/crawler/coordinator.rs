//! Per-run coordination
//!
//! The coordinator owns the wiring: it opens the sink, builds the fetcher
//! and extractor, and runs the crawl-then-process cycle for every
//! configured query. Startup faults (bad sink path, client build failure)
//! are the only errors it surfaces; once running, failures degrade to fewer
//! records and the run always completes with totals.

use crate::config::Config;
use crate::crawler::pagination::LinkCrawler;
use crate::crawler::pipeline::{DetailPipeline, PipelineTotals};
use crate::extract::{PageExtractor, ZipRecruiterExtractor};
use crate::fetch::Fetcher;
use crate::output::{open_sink, RecordSink};
use crate::HarvestError;
use std::path::Path;
use std::sync::Arc;

/// Whole-run accounting, reported when the run finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    pub queries: usize,
    pub links_found: usize,
    pub records_written: usize,
    pub fetch_failures: usize,
    pub extraction_failures: usize,
    pub sink_failures: usize,
}

impl RunTotals {
    fn absorb(&mut self, totals: &PipelineTotals) {
        self.links_found += totals.links;
        self.records_written += totals.written;
        self.fetch_failures += totals.fetch_failures;
        self.extraction_failures += totals.extraction_failures;
        self.sink_failures += totals.sink_failures;
    }

    /// Links that produced no persisted record
    pub fn omissions(&self) -> usize {
        self.fetch_failures + self.extraction_failures + self.sink_failures
    }
}

/// Runs the harvest for every configured query
pub struct Coordinator {
    config: Config,
    fetcher: Arc<Fetcher>,
    extractor: Arc<dyn PageExtractor>,
    sink: Arc<dyn RecordSink>,
}

impl Coordinator {
    /// Creates a coordinator with the production wiring
    ///
    /// Opens the sink for the configured records path and builds the
    /// default fetch strategy stack. Failure here is a startup fault and
    /// should abort the process.
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let sink: Arc<dyn RecordSink> =
            Arc::from(open_sink(Path::new(&config.output.records_path))?);
        let fetcher = Arc::new(Fetcher::new()?);

        Ok(Self {
            config,
            fetcher,
            extractor: Arc::new(ZipRecruiterExtractor),
            sink,
        })
    }

    /// Creates a coordinator from explicit parts, for callers that supply
    /// their own fetcher, extractor, or sink
    pub fn with_parts(
        config: Config,
        fetcher: Arc<Fetcher>,
        extractor: Arc<dyn PageExtractor>,
        sink: Arc<dyn RecordSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            sink,
        }
    }

    /// Runs the full harvest and returns whole-run totals
    ///
    /// Queries are walked one after another; a query whose pagination walk
    /// fails or finds nothing is logged and skipped without affecting the
    /// rest of the run.
    pub async fn run(&self) -> RunTotals {
        tracing::info!("Starting scraping process");

        let mut totals = RunTotals {
            queries: self.config.queries.len(),
            ..Default::default()
        };

        for query in &self.config.queries {
            let crawler =
                LinkCrawler::new(&self.fetcher, self.extractor.as_ref(), &self.config.crawler);
            let links = crawler.crawl(query).await;

            if links.is_empty() {
                tracing::warn!("No links were found to process for '{}'", query);
                continue;
            }

            tracing::info!("Processing {} links for '{}'", links.len(), query);
            let pipeline = DetailPipeline::new(
                Arc::clone(&self.fetcher),
                Arc::clone(&self.extractor),
                Arc::clone(&self.sink),
                self.config.crawler.max_concurrent_details as usize,
                self.config.crawler.request_timeout(),
            );

            let query_totals = pipeline.process(links).await;
            tracing::info!(
                "Query '{}' complete: {} records written, {} omissions",
                query,
                query_totals.written,
                query_totals.omissions()
            );
            totals.absorb(&query_totals);
        }

        tracing::info!(
            "Run complete: {} links found, {} records written, {} omissions across {} queries",
            totals.links_found,
            totals.records_written,
            totals.omissions(),
            totals.queries
        );

        totals
    }
}
