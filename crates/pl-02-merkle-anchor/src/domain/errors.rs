//! # Domain Errors

use shared_types::{BatchLookupError, ErrorKind};
use thiserror::Error;

/// Merkle anchor error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnchorError {
    /// Submitted root is the zero value.
    #[error("Root cannot be zero")]
    ZeroRoot,

    /// Batch does not resolve in the registry.
    #[error(transparent)]
    Registry(#[from] BatchLookupError),
}

impl AnchorError {
    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroRoot => ErrorKind::BadInput,
            Self::Registry(e) => e.kind(),
        }
    }
}
