//! # Domain Invariants
//!
//! Workflow rules for change notices.

use super::errors::NoticeError;
use shared_types::NoticeStatus;

/// Invariant: a notice is created with a non-empty summary.
pub fn invariant_non_empty_summary(summary: &str) -> Result<(), NoticeError> {
    if summary.is_empty() {
        return Err(NoticeError::EmptySummary);
    }
    Ok(())
}

/// Invariant: only drafts are submitted.
pub fn invariant_is_draft(status: NoticeStatus) -> Result<(), NoticeError> {
    if status != NoticeStatus::Draft {
        return Err(NoticeError::NotDraft);
    }
    Ok(())
}

/// Invariant: the regulator rules only on submitted notices.
pub fn invariant_is_submitted(status: NoticeStatus) -> Result<(), NoticeError> {
    if status != NoticeStatus::Submitted {
        return Err(NoticeError::NotSubmitted);
    }
    Ok(())
}
