/// Storage-specific errors
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data file could not be read or written
    #[error("Data file error at {path}: {source}")]
    File {
        /// Path of the data file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The data file does not hold a valid dataset
    #[error("Malformed data file at {path}: {source}")]
    Malformed {
        /// Path of the data file
        path: PathBuf,
        /// Underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of the dataset failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for apparel_core::CoreError {
    fn from(err: StorageError) -> Self {
        apparel_core::CoreError::storage(err.to_string())
    }
}
