//! JSON Lines record sink

use crate::output::traits::{RecordSink, SinkError};
use crate::record::JobRecord;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Record sink that appends one JSON object per line
///
/// Each append serializes the record to a single line and writes it under a
/// mutex, so concurrent appends never interleave within a line.
pub struct JsonlSink {
    file: Mutex<File>,
}

impl JsonlSink {
    /// Opens (or creates) the output file in append mode
    ///
    /// Opening an existing file keeps its contents; the format has no
    /// header, so initialization is a plain create-if-missing.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RecordSink for JsonlSink {
    fn append(&self, record: &JobRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| SinkError::Poisoned)?;
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
