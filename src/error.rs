//! Error types for the bookkeeping ledger.

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BookkeepingError>;

/// Errors that can occur while reading, writing or reporting on the ledger.
///
/// Corrupted stored data is not an error: it decodes to an empty ledger.
/// Only failures of the underlying storage or output streams surface here.
#[derive(Error, Debug)]
pub enum BookkeepingError {
    /// Failed to read or write the backing file or an output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding of the storage file failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The backing file exists but is not a key-value document
    #[error("Storage file {path} is not a valid key-value document")]
    CorruptStorage { path: String },
}
