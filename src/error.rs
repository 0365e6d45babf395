//! Error types for Protea.

use thiserror::Error;

/// Result type alias using [`ProteaError`].
pub type Result<T> = std::result::Result<T, ProteaError>;

/// The error type for all fallible Protea operations.
///
/// Most variants are recoverable at some level: a `DimensionMismatch` is
/// fatal only for the comparison that produced it, a `MalformedShard` only
/// for the ids that shard would have served. `InsufficientEmbeddings` is the
/// one failure callers of the analysis path must always handle.
#[derive(Error, Debug)]
pub enum ProteaError {
    /// Two vectors of different dimensionality were compared.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A shard file could not be decoded.
    #[error("malformed shard '{shard}': {message}")]
    MalformedShard { shard: String, message: String },

    /// Too few resolvable vectors to perform the requested analysis.
    #[error("insufficient embeddings: {0}")]
    InsufficientEmbeddings(String),

    /// An argument was outside the accepted range or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProteaError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        ProteaError::DimensionMismatch { expected, actual }
    }

    /// Create a malformed shard error.
    pub fn malformed_shard(shard: impl Into<String>, message: impl Into<String>) -> Self {
        ProteaError::MalformedShard {
            shard: shard.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient embeddings error.
    pub fn insufficient_embeddings(message: impl Into<String>) -> Self {
        ProteaError::InsufficientEmbeddings(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ProteaError::InvalidArgument(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ProteaError::Internal(message.into())
    }
}
