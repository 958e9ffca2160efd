//! Error types for the product store and the application surface around it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing file missing, unreadable, or not a valid product array
    #[error("Failed to read store file {}: {reason}", .path.display())]
    StorageRead { path: PathBuf, reason: String },

    /// Creating, writing or renaming the backing file failed
    #[error("Failed to write store file {}: {reason}", .path.display())]
    StorageWrite { path: PathBuf, reason: String },

    #[error("Product not found: {0}")]
    NotFound(String),

    /// Required product fields missing on insertion
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Sequential id space exhausted")]
    IdSpaceExhausted,
}

impl StoreError {
    pub(crate) fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StoreError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StoreError::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Top-level error for configuration, CLI input and store failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
