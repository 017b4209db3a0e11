//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// Queries never fail; these cover loading schema documents and
/// configuration.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Schema document is structurally invalid.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// No adapter registered for a storage type.
    #[error("unknown storage type: {0}")]
    UnknownStorageType(String),
}
