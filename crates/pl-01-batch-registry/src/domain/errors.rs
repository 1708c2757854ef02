//! # Domain Errors
//!
//! Error types for the Batch Registry.

use shared_types::{BatchId, BatchState, ErrorKind};
use thiserror::Error;

/// Batch registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Batch was never created.
    #[error("Batch not found: {0}")]
    NotFound(BatchId),

    /// Caller is not the registry owner.
    #[error("Not owner")]
    NotOwner,

    /// Caller is not the designated operator.
    #[error("Not operator")]
    NotOperator,

    /// Structurally invalid argument.
    #[error("Bad input: {0}")]
    BadInput(&'static str),

    /// External id was used by an earlier batch.
    #[error("External id already used")]
    ExternalIdUsed,

    /// Metadata hash was used before (by any batch, at any time).
    #[error("Metadata hash already used")]
    MetadataHashUsed,

    /// Batch is in a terminal state.
    #[error("Batch {batch_id} already terminal ({state})")]
    AlreadyTerminal {
        /// Batch id
        batch_id: BatchId,
        /// Terminal state it is in
        state: BatchState,
    },

    /// Requested move is not in the lifecycle table.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state
        from: BatchState,
        /// Attempted state
        to: BatchState,
    },
}

impl RegistryError {
    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotOwner | Self::NotOperator => ErrorKind::Unauthorized,
            Self::BadInput(_) => ErrorKind::BadInput,
            Self::ExternalIdUsed | Self::MetadataHashUsed => ErrorKind::UniquenessViolation,
            Self::AlreadyTerminal { .. } | Self::InvalidTransition { .. } => {
                ErrorKind::InvalidState
            }
        }
    }
}
