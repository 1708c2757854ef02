//! # Inbound Ports
//!
//! API trait defining what the Change Notice workflow can do.

use super::outbound::RootAnchor;
use crate::domain::{NewNotice, Notice, NoticeError};
use shared_types::{Address, BatchId, NoticeId};

/// Change notice API - inbound port.
pub trait ChangeNoticeApi: Send + Sync {
    /// Root store type this workflow can be wired to.
    type Anchor: RootAnchor;

    /// Draft a notice against an existing batch (supplier only).
    fn create_notice(&mut self, caller: Address, params: NewNotice)
        -> Result<NoticeId, NoticeError>;

    /// Send a draft to the regulator (original creator, still a supplier).
    fn submit(&mut self, caller: Address, notice_id: NoticeId) -> Result<(), NoticeError>;

    /// Approve a submitted notice and push its anchor (regulator only).
    fn approve(
        &mut self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), NoticeError>;

    /// Reject a submitted notice (regulator only).
    fn reject(
        &mut self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), NoticeError>;

    /// Replace the regulator (owner only).
    fn set_regulator(&mut self, caller: Address, regulator: Address) -> Result<(), NoticeError>;

    /// Grant or revoke the supplier capability (owner only).
    fn set_supplier(
        &mut self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), NoticeError>;

    /// Grant or revoke the retailer capability (owner only).
    fn set_retailer(
        &mut self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), NoticeError>;

    /// Attach or detach the root store (owner only).
    fn set_merkle_anchor(
        &mut self,
        caller: Address,
        anchor: Option<Self::Anchor>,
    ) -> Result<(), NoticeError>;

    /// Hand ownership to another account (owner only).
    fn transfer_ownership(&mut self, caller: Address, new_owner: Address)
        -> Result<(), NoticeError>;

    /// Full notice record, including its acknowledgement counter.
    fn get_notice(&self, notice_id: NoticeId) -> Result<&Notice, NoticeError>;

    /// Notice ids for a batch in creation order.
    fn notices_for_batch(&self, batch_id: BatchId) -> &[NoticeId];

    /// Check the notice's anchor against the root store.
    ///
    /// False when no store is attached or the notice has no anchor.
    fn anchor_verified_on_merkle(&self, notice_id: NoticeId) -> Result<bool, NoticeError>;
}
