//! Record sinks
//!
//! This module defines the append-only persistence contract for job records
//! and its two backends: a SQLite database and a JSON Lines file. The
//! backend is selected from the output path's extension, so the rest of the
//! system only ever sees the [`RecordSink`] trait.

mod jsonl;
mod sqlite;
mod traits;

pub use jsonl::JsonlSink;
pub use sqlite::SqliteSink;
pub use traits::{RecordSink, SinkError};

use std::path::Path;

/// Opens the sink backend matching the path's extension
///
/// `.db`, `.sqlite`, `.sqlite3` open a SQLite sink; `.json`, `.jsonl`,
/// `.ndjson` open a JSON Lines sink. Anything else is a configuration
/// fault.
///
/// Opening initializes the backing store exactly once, idempotently, so it
/// is ready before the first append.
pub fn open_sink(path: &Path) -> Result<Box<dyn RecordSink>, SinkError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "db" | "sqlite" | "sqlite3" => Ok(Box::new(SqliteSink::open(path)?)),
        "json" | "jsonl" | "ndjson" => Ok(Box::new(JsonlSink::open(path)?)),
        other => Err(SinkError::UnsupportedFormat(other.to_string())),
    }
}
