//! # Domain Errors
//!
//! Error types for the Change Notice workflow. Each role has its own variant
//! so a caller can tell "not creator" from "not supplier".

use pl_02_merkle_anchor::AnchorError;
use shared_types::{BatchLookupError, ErrorKind, NoticeId};
use thiserror::Error;

/// Change notice error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoticeError {
    /// Caller lacks the supplier capability.
    #[error("Not supplier")]
    NotSupplier,

    /// Caller did not create the notice.
    #[error("Not creator")]
    NotCreator,

    /// Caller is not the regulator.
    #[error("Not regulator")]
    NotRegulator,

    /// Caller is not the owner.
    #[error("Not owner")]
    NotOwner,

    /// Notice id was never allocated.
    #[error("Missing")]
    Missing(NoticeId),

    /// Summary is empty.
    #[error("Empty summary")]
    EmptySummary,

    /// Notice is past `Draft`.
    #[error("Not draft")]
    NotDraft,

    /// Notice is not awaiting the regulator.
    #[error("Not submitted")]
    NotSubmitted,

    /// Structurally invalid argument.
    #[error("Bad input: {0}")]
    BadInput(&'static str),

    /// Batch lookup failed.
    #[error(transparent)]
    Registry(#[from] BatchLookupError),

    /// Anchor push failed.
    #[error(transparent)]
    Anchor(#[from] AnchorError),
}

impl NoticeError {
    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSupplier | Self::NotCreator | Self::NotRegulator | Self::NotOwner => {
                ErrorKind::Unauthorized
            }
            Self::Missing(_) => ErrorKind::NotFound,
            Self::EmptySummary | Self::BadInput(_) => ErrorKind::BadInput,
            Self::NotDraft | Self::NotSubmitted => ErrorKind::InvalidState,
            Self::Registry(e) => e.kind(),
            Self::Anchor(e) => e.kind(),
        }
    }
}
