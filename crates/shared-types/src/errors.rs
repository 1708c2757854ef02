//! # Error Types
//!
//! Error taxonomy shared across subsystems, plus the error of the registry
//! lookup port.

use crate::entities::BatchId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure category every subsystem error maps into.
///
/// Lets a caller separate programmer error (`BadInput`, `Unauthorized`)
/// from workflow conflicts (`InvalidState`, `UniquenessViolation`) without
/// matching on concrete variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Referenced batch or notice does not exist.
    NotFound,
    /// Caller lacks the capability the operation requires.
    Unauthorized,
    /// Current state or status forbids the operation.
    InvalidState,
    /// Structurally invalid argument.
    BadInput,
    /// Collision with a previously used unique value.
    UniquenessViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Error returned by `BatchStateReader`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchLookupError {
    /// Batch was never created.
    #[error("Batch not found: {0}")]
    NotFound(BatchId),
}

impl BatchLookupError {
    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}
