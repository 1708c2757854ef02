//! # Ledger Events
//!
//! Defines every record the subsystems append to the event log.

use serde::{Deserialize, Serialize};
use shared_types::entities::{
    Address, BatchId, BatchState, Hash, NoticeId, NoticeType, Severity, Timestamp,
};

/// Owned component whose ownership changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// The batch registry.
    BatchRegistry,
    /// The change-notice workflow.
    ChangeNotice,
}

/// All records that can be appended to the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // =========================================================================
    // BATCH REGISTRY
    // =========================================================================
    /// A batch was registered.
    BatchCreated {
        batch_id: BatchId,
        creator: Address,
        external_id: Hash,
        metadata_uri: String,
        metadata_hash: Hash,
        created_at: Timestamp,
    },

    /// A batch moved along the lifecycle table (or was recalled).
    LifecycleAdvanced {
        batch_id: BatchId,
        from: BatchState,
        to: BatchState,
    },

    /// A batch was recalled.
    BatchRecalled { batch_id: BatchId, reason: String },

    /// Metadata pointer and hash were replaced.
    MetadataUpdated {
        batch_id: BatchId,
        old_uri: String,
        new_uri: String,
        old_hash: Hash,
        new_hash: Hash,
    },

    /// The registry operator changed.
    OperatorChanged { previous: Address, new: Address },

    /// Ownership of a component changed hands.
    OwnershipTransferred {
        component: Component,
        previous: Address,
        new: Address,
    },

    // =========================================================================
    // CHANGE NOTICE
    // =========================================================================
    /// The regulator identity changed.
    RegulatorChanged { previous: Address, new: Address },

    /// Supplier capability granted or revoked.
    SupplierSet { account: Address, enabled: bool },

    /// Retailer capability granted or revoked.
    RetailerSet { account: Address, enabled: bool },

    /// The anchoring component was attached or detached.
    MerkleAnchorSet { configured: bool },

    /// A notice was drafted.
    NoticeCreated {
        notice_id: NoticeId,
        batch_id: BatchId,
        creator: Address,
        notice_type: NoticeType,
        severity: Severity,
        effective_from: Timestamp,
        anchor: Hash,
    },

    /// A draft was submitted for review.
    NoticeSubmitted {
        notice_id: NoticeId,
        batch_id: BatchId,
        submitter: Address,
    },

    /// The regulator approved a notice.
    NoticeApproved {
        notice_id: NoticeId,
        batch_id: BatchId,
        regulator: Address,
        note: String,
    },

    /// The regulator rejected a notice.
    NoticeRejected {
        notice_id: NoticeId,
        batch_id: BatchId,
        regulator: Address,
        note: String,
    },

    /// An approved notice's anchor was pushed to the root store.
    AnchorPushed {
        notice_id: NoticeId,
        batch_id: BatchId,
        root: Hash,
    },

    // =========================================================================
    // MERKLE ANCHOR
    // =========================================================================
    /// A root was declared for a batch.
    RootSubmitted {
        batch_id: BatchId,
        root: Hash,
        submitter: Address,
    },
}

impl LedgerEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::BatchCreated { .. }
            | Self::LifecycleAdvanced { .. }
            | Self::BatchRecalled { .. }
            | Self::MetadataUpdated { .. }
            | Self::OperatorChanged { .. } => EventTopic::Registry,
            Self::OwnershipTransferred { component, .. } => match component {
                Component::BatchRegistry => EventTopic::Registry,
                Component::ChangeNotice => EventTopic::Notices,
            },
            Self::RegulatorChanged { .. }
            | Self::SupplierSet { .. }
            | Self::RetailerSet { .. }
            | Self::MerkleAnchorSet { .. }
            | Self::NoticeCreated { .. }
            | Self::NoticeSubmitted { .. }
            | Self::NoticeApproved { .. }
            | Self::NoticeRejected { .. }
            | Self::AnchorPushed { .. } => EventTopic::Notices,
            Self::RootSubmitted { .. } => EventTopic::Anchors,
        }
    }

    /// Batch this event concerns, if any.
    #[must_use]
    pub fn batch_id(&self) -> Option<BatchId> {
        match self {
            Self::BatchCreated { batch_id, .. }
            | Self::LifecycleAdvanced { batch_id, .. }
            | Self::BatchRecalled { batch_id, .. }
            | Self::MetadataUpdated { batch_id, .. }
            | Self::NoticeCreated { batch_id, .. }
            | Self::NoticeSubmitted { batch_id, .. }
            | Self::NoticeApproved { batch_id, .. }
            | Self::NoticeRejected { batch_id, .. }
            | Self::AnchorPushed { batch_id, .. }
            | Self::RootSubmitted { batch_id, .. } => Some(*batch_id),
            _ => None,
        }
    }

    /// Notice this event concerns, if any.
    #[must_use]
    pub fn notice_id(&self) -> Option<NoticeId> {
        match self {
            Self::NoticeCreated { notice_id, .. }
            | Self::NoticeSubmitted { notice_id, .. }
            | Self::NoticeApproved { notice_id, .. }
            | Self::NoticeRejected { notice_id, .. }
            | Self::AnchorPushed { notice_id, .. } => Some(*notice_id),
            _ => None,
        }
    }
}

/// A committed event with its position in the total order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Gap-free position, starting at 1.
    pub sequence: u64,
    /// The event.
    pub event: LedgerEvent,
}

/// Topics for event filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Batch registry events.
    Registry,
    /// Change-notice events.
    Notices,
    /// Root-store events.
    Anchors,
    /// All events.
    All,
}

/// Filter for subscribing to and querying events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Batches to include. Empty means all batches.
    pub batches: Vec<BatchId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            batches: Vec::new(),
        }
    }

    /// Create a filter for events concerning specific batches.
    #[must_use]
    pub fn batches(batches: Vec<BatchId>) -> Self {
        Self {
            topics: Vec::new(),
            batches,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let batch_match = self.batches.is_empty()
            || event
                .batch_id()
                .is_some_and(|id| self.batches.contains(&id));

        topic_match && batch_match
    }
}
