//! Page extraction
//!
//! This module defines the extraction contract the crawler depends on and
//! the concrete ZipRecruiter implementation. Extraction is pure parsing:
//! text in, structured data out, no I/O.

mod ziprecruiter;

pub use ziprecruiter::{ZipRecruiterExtractor, SOURCE_DOMAIN};

use crate::record::JobRecord;
use thiserror::Error;

/// Identifier of the next listing page in a pagination sequence
///
/// Opaque to the crawler; for this site it is the 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken(pub u32);

/// The result of extracting a listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Detail-page URLs found on the page, in document order
    pub links: Vec<String>,

    /// Token of the next listing page, if the page links to one
    pub next_page: Option<PageToken>,
}

/// Errors from parsing a fetched page
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("invalid selector {0}")]
    Selector(String),

    #[error("no structured-data block found")]
    MissingStructuredData,

    #[error("malformed structured data: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("structured data missing field '{0}'")]
    MissingField(&'static str),
}

/// Page extraction contract
///
/// Listing mode yields detail links plus an optional next-page token;
/// detail mode yields one complete [`JobRecord`].
pub trait PageExtractor: Send + Sync {
    /// Extracts detail links and the next-page token from a listing page
    ///
    /// `page_url` is the URL the HTML was fetched from, used to resolve
    /// relative links.
    fn extract_listing(
        &self,
        html: &str,
        page_url: &url::Url,
    ) -> Result<ListingPage, ExtractionError>;

    /// Extracts a job record from a detail page
    ///
    /// `page_url` becomes the record's source URL.
    fn extract_detail(&self, html: &str, page_url: &str) -> Result<JobRecord, ExtractionError>;
}
