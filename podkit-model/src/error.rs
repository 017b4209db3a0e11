//! Error types for the object model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur in model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Attribute name outside the supported table.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Reference kind other than parent or group.
    #[error("unknown relation: {0}")]
    UnknownRelation(String),
}
