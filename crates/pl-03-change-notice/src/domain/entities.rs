//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{
    is_zero_hash, Address, BatchId, Hash, NoticeId, NoticeStatus, NoticeType, Severity, Timestamp,
};

/// A regulator-reviewable change notice against one batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Sequential identifier.
    pub id: NoticeId,
    /// Batch the notice concerns.
    pub batch_id: BatchId,
    /// Supplier that drafted it.
    pub creator: Address,
    /// Draft time.
    pub created_at: Timestamp,
    /// Kind of change.
    pub notice_type: NoticeType,
    /// Severity tag.
    pub severity: Severity,
    /// Workflow status.
    pub status: NoticeStatus,
    /// When the change takes effect.
    pub effective_from: Timestamp,
    /// Free-text summary (never empty).
    pub summary: String,
    /// Where the full details live.
    pub details_uri: String,
    /// Integrity value; zero means none.
    pub anchor: Hash,
    /// Regulator's note, set on approval or rejection.
    pub regulator_note: String,
    /// Acknowledgements received. No operation increments this yet.
    pub ack_count: u64,
}

/// Parameters for drafting a notice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotice {
    /// Batch the notice concerns (must exist).
    pub batch_id: BatchId,
    /// Kind of change.
    pub notice_type: NoticeType,
    /// Severity tag.
    pub severity: Severity,
    /// When the change takes effect.
    pub effective_from: Timestamp,
    /// Free-text summary.
    pub summary: String,
    /// Where the full details live.
    pub details_uri: String,
    /// Integrity value; zero means none.
    pub anchor: Hash,
}

impl Notice {
    /// Draft a notice.
    pub fn new(id: NoticeId, creator: Address, created_at: Timestamp, params: NewNotice) -> Self {
        Self {
            id,
            batch_id: params.batch_id,
            creator,
            created_at,
            notice_type: params.notice_type,
            severity: params.severity,
            status: NoticeStatus::Draft,
            effective_from: params.effective_from,
            summary: params.summary,
            details_uri: params.details_uri,
            anchor: params.anchor,
            regulator_note: String::new(),
            ack_count: 0,
        }
    }

    /// Check whether the notice carries an anchor.
    pub fn has_anchor(&self) -> bool {
        !is_zero_hash(&self.anchor)
    }

    /// Draft → Submitted. The caller has checked the status.
    pub(crate) fn submit(&mut self) {
        self.status = NoticeStatus::Submitted;
    }

    /// Submitted → Approved, storing the note.
    pub(crate) fn approve(&mut self, note: String) {
        self.decide(NoticeStatus::Approved, note);
    }

    /// Submitted → Rejected, storing the note.
    pub(crate) fn reject(&mut self, note: String) {
        self.decide(NoticeStatus::Rejected, note);
    }

    fn decide(&mut self, outcome: NoticeStatus, note: String) {
        debug_assert!(NoticeStatus::Submitted.can_transition_to(outcome));
        self.status = outcome;
        self.regulator_note = note;
    }
}
