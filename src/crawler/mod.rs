//! Crawl orchestration
//!
//! This module contains the harvesting logic built on the fetch and
//! extraction layers:
//! - Sequential pagination walk per search query
//! - Link accumulation with dedup
//! - Concurrent detail fetch/extract/persist fan-out
//! - Per-run coordination and totals

mod coordinator;
mod links;
mod pagination;
mod pipeline;

pub use coordinator::{Coordinator, RunTotals};
pub use links::LinkSet;
pub use pagination::LinkCrawler;
pub use pipeline::{DetailPipeline, PipelineTotals};

use crate::config::Config;
use crate::HarvestError;

/// Runs the complete harvest for every configured query
///
/// This is the main entry point. It opens the sink, builds the fetcher and
/// extractor, walks the listing pages of each query, and fans out over the
/// discovered detail pages. Per-page and per-link failures degrade to fewer
/// records; only startup faults (configuration, sink, client build) return
/// an error.
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(RunTotals)` - The run completed; totals describe what was written
/// * `Err(HarvestError)` - Startup failed before any crawling began
pub async fn harvest(config: Config) -> Result<RunTotals, HarvestError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

/// First part of a page body, for diagnostic log lines
pub(crate) fn body_snippet(body: &str) -> &str {
    match body.char_indices().nth(500) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
