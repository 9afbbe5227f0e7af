//! Storage abstraction trait
//!
//! This module defines the read-only gateway the proxy fetches objects through.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use vitrine_core::{AppError, StorageBackend};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// The client for a backend descriptor could not be built.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::ObjectNotFound(key),
            StorageError::DownloadFailed(msg) => AppError::StorageUnavailable(msg),
            StorageError::ConfigError(msg) => AppError::StorageUnavailable(msg),
        }
    }
}

/// Storage abstraction trait
///
/// Every call names the backend it targets, so one gateway serves all location
/// rules. A single attempt is made per call; implementations must not retry.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object in full.
    ///
    /// Returns `NotFound` when the store reports the key as absent. A present but
    /// empty object is returned as empty `Bytes`; deciding what that means is
    /// left to the caller.
    async fn download(&self, backend: &StorageBackend, storage_key: &str) -> StorageResult<Bytes>;
}
