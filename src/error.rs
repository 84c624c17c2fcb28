//! Error types for the allowlist builder

use thiserror::Error;

/// Error type for allowlist operations.
///
/// `InvalidIdentifier` and `InvalidWeight` are per-record failures: the batch
/// pipeline logs them, records the entry as skipped and keeps going. The other
/// variants abort whatever operation produced them.
#[derive(Debug, Error)]
pub enum AllowlistError {
    /// Account identifier is not a 20-byte hex address
    #[error("{input:?} is not a valid address: {reason}")]
    InvalidIdentifier { input: String, reason: String },
    /// Weight column is not an unsigned 256-bit integer
    #[error("{input:?} is not a valid weight: {reason}")]
    InvalidWeight { input: String, reason: String },
    /// No valid leaves were left to build a tree from
    #[error("cannot build a merkle tree without leaves")]
    EmptyTree,
    /// Proof requested for a leaf the tree does not have
    #[error("leaf index {index} out of range for a tree of {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// Encoded proof is truncated or inconsistent
    #[error("malformed proof encoding: {0}")]
    MalformedProof(String),
    /// Artifact serialization failed
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AllowlistError {
    /// Whether the error only concerns a single record and the batch can go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AllowlistError::InvalidIdentifier { .. } | AllowlistError::InvalidWeight { .. }
        )
    }
}
