use crate::record::JobRecord;
use thiserror::Error;

/// Errors from record persistence
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink lock poisoned")]
    Poisoned,

    #[error("unsupported records format '{0}'")]
    UnsupportedFormat(String),
}

/// Append-only persistence for job records
///
/// Implementations must serialize concurrent appends internally: the detail
/// pipeline calls `append` from many tasks at once, and interleaved writes
/// must never corrupt the persisted structure. A failed append affects only
/// that record.
pub trait RecordSink: Send + Sync {
    fn append(&self, record: &JobRecord) -> Result<(), SinkError>;
}
