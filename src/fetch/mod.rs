//! HTTP fetch layer
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building fetch requests with a realistic browser header set
//! - An ordered list of transport strategies tried per request
//! - Falling back to the next strategy on transport failures
//! - Error classification and per-strategy diagnostics

mod fetcher;
mod request;
mod strategy;

pub use fetcher::{FetchError, Fetcher, StrategyFailure};
pub use request::{FetchRequest, DEFAULT_USER_AGENT};
pub use strategy::{
    BareClientStrategy, BrowserTlsStrategy, FetchStrategy, PooledClientStrategy, TransportError,
    TransportErrorKind,
};
