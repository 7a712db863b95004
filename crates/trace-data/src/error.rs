//! Trace Ingest Error Types

use thiserror::Error;

/// Errors while reading or validating trace data
#[derive(Debug, Error)]
pub enum TraceError {
    /// Label file could not be opened or read
    #[error("failed to read label file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Label file is missing a required column or a cell failed to parse
    #[error("malformed label file {path}: {detail}")]
    Malformed { path: String, detail: String },

    /// Timestamps went backwards within one clip
    #[error("non-monotonic timestamp in {path} at row {row}: {prev} -> {curr}")]
    NonMonotonicTimestamp {
        path: String,
        row: usize,
        prev: f64,
        curr: f64,
    },
}
