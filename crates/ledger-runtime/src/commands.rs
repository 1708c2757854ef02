//! # Replay Commands
//!
//! Serde representation of every mutating ledger operation. Addresses and
//! hashes are hex strings; each command names its caller.
//!
//! ```json
//! [
//!   {"op": "create_batch", "caller": "0x03..", "external_id": "0x..",
//!    "metadata_uri": "ipfs://lot-7", "metadata_hash": "0x.."},
//!   {"op": "advance_lifecycle", "caller": "0x02..", "batch_id": 1,
//!    "state": "InTransit"}
//! ]
//! ```

use crate::hex_codec::serde_fixed;
use serde::{Deserialize, Serialize};
use shared_types::{
    Address, BatchId, BatchState, Hash, NoticeId, NoticeType, Severity, Timestamp,
};

/// One mutating operation with its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// Register a batch.
    CreateBatch {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        external_id: Hash,
        metadata_uri: String,
        #[serde(with = "serde_fixed")]
        metadata_hash: Hash,
    },
    /// Move a batch along the lifecycle table.
    AdvanceLifecycle {
        #[serde(with = "serde_fixed")]
        caller: Address,
        batch_id: BatchId,
        state: BatchState,
    },
    /// Recall a batch.
    Recall {
        #[serde(with = "serde_fixed")]
        caller: Address,
        batch_id: BatchId,
        reason: String,
    },
    /// Replace a batch's metadata pointer.
    UpdateMetadata {
        #[serde(with = "serde_fixed")]
        caller: Address,
        batch_id: BatchId,
        metadata_uri: String,
        #[serde(with = "serde_fixed")]
        metadata_hash: Hash,
    },
    /// Designate the registry operator.
    SetOperator {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        operator: Address,
    },
    /// Hand over the registry.
    TransferRegistryOwnership {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        new_owner: Address,
    },
    /// Declare a root directly in the anchor store.
    SubmitRoot {
        #[serde(with = "serde_fixed")]
        caller: Address,
        batch_id: BatchId,
        #[serde(with = "serde_fixed")]
        root: Hash,
    },
    /// Draft a notice.
    CreateNotice {
        #[serde(with = "serde_fixed")]
        caller: Address,
        batch_id: BatchId,
        notice_type: NoticeType,
        severity: Severity,
        effective_from: Timestamp,
        summary: String,
        #[serde(default)]
        details_uri: String,
        /// Omitted means no anchor.
        #[serde(default, with = "serde_fixed")]
        anchor: Hash,
    },
    /// Submit a draft.
    SubmitNotice {
        #[serde(with = "serde_fixed")]
        caller: Address,
        notice_id: NoticeId,
    },
    /// Approve a submitted notice.
    ApproveNotice {
        #[serde(with = "serde_fixed")]
        caller: Address,
        notice_id: NoticeId,
        note: String,
    },
    /// Reject a submitted notice.
    RejectNotice {
        #[serde(with = "serde_fixed")]
        caller: Address,
        notice_id: NoticeId,
        note: String,
    },
    /// Replace the regulator.
    SetRegulator {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        regulator: Address,
    },
    /// Grant or revoke the supplier capability.
    SetSupplier {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        account: Address,
        enabled: bool,
    },
    /// Grant or revoke the retailer capability.
    SetRetailer {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        account: Address,
        enabled: bool,
    },
    /// Attach or detach the anchor store.
    SetMerkleAnchor {
        #[serde(with = "serde_fixed")]
        caller: Address,
        enabled: bool,
    },
    /// Hand over the notice workflow.
    TransferNoticeOwnership {
        #[serde(with = "serde_fixed")]
        caller: Address,
        #[serde(with = "serde_fixed")]
        new_owner: Address,
    },
}

impl LedgerCommand {
    /// Caller named by the command.
    pub fn caller(&self) -> Address {
        match self {
            Self::CreateBatch { caller, .. }
            | Self::AdvanceLifecycle { caller, .. }
            | Self::Recall { caller, .. }
            | Self::UpdateMetadata { caller, .. }
            | Self::SetOperator { caller, .. }
            | Self::TransferRegistryOwnership { caller, .. }
            | Self::SubmitRoot { caller, .. }
            | Self::CreateNotice { caller, .. }
            | Self::SubmitNotice { caller, .. }
            | Self::ApproveNotice { caller, .. }
            | Self::RejectNotice { caller, .. }
            | Self::SetRegulator { caller, .. }
            | Self::SetSupplier { caller, .. }
            | Self::SetRetailer { caller, .. }
            | Self::SetMerkleAnchor { caller, .. }
            | Self::TransferNoticeOwnership { caller, .. } => *caller,
        }
    }

    /// Operation name as it appears in scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateBatch { .. } => "create_batch",
            Self::AdvanceLifecycle { .. } => "advance_lifecycle",
            Self::Recall { .. } => "recall",
            Self::UpdateMetadata { .. } => "update_metadata",
            Self::SetOperator { .. } => "set_operator",
            Self::TransferRegistryOwnership { .. } => "transfer_registry_ownership",
            Self::SubmitRoot { .. } => "submit_root",
            Self::CreateNotice { .. } => "create_notice",
            Self::SubmitNotice { .. } => "submit_notice",
            Self::ApproveNotice { .. } => "approve_notice",
            Self::RejectNotice { .. } => "reject_notice",
            Self::SetRegulator { .. } => "set_regulator",
            Self::SetSupplier { .. } => "set_supplier",
            Self::SetRetailer { .. } => "set_retailer",
            Self::SetMerkleAnchor { .. } => "set_merkle_anchor",
            Self::TransferNoticeOwnership { .. } => "transfer_notice_ownership",
        }
    }
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// A batch id was allocated.
    BatchCreated {
        /// New batch id
        batch_id: BatchId,
    },
    /// A notice id was allocated.
    NoticeCreated {
        /// New notice id
        notice_id: NoticeId,
    },
    /// The command applied without allocating an id.
    Applied,
}
