use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised when the bot state cannot be persisted.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Encoding the state document failed.
    #[error("failed to encode bot state")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    /// Writing the state document to disk failed.
    #[error("failed to write bot state to `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Construct a write error for the given destination.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Write {
            path: path.into(),
            source,
        }
    }
}
