//! # Change Notice Service
//!
//! The workflow service implementing `ChangeNoticeApi`.
//!
//! ## Architecture
//!
//! Every operation checks the caller's role, then the notice or batch it
//! names, then the status, and only then mutates. The anchor push in
//! `approve` is the one cross-component write: it runs before the local
//! status change, so a failed push leaves the notice untouched.


use crate::domain::{
    invariant_is_draft, invariant_is_submitted, invariant_non_empty_summary, NewNotice, Notice,
    NoticeError,
};
use crate::ports::{ChangeNoticeApi, RootAnchor};
use shared_bus::{Component, EventRecorder, LedgerEvent};
use shared_types::{
    is_zero_address, short_hex, Address, BatchId, BatchStateReader, NoticeId, TimeSource,
    ZERO_ADDRESS,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dependencies for ChangeNotice.
pub struct NoticeDependencies {
    /// Source of draft timestamps.
    pub clock: Arc<dyn TimeSource>,
    /// Audit record sink.
    pub events: Arc<dyn EventRecorder>,
}

/// The Change Notice workflow.
pub struct ChangeNotice<R: BatchStateReader, A: RootAnchor> {
    owner: Address,
    /// Single approving identity; zero until set.
    regulator: Address,
    suppliers: HashSet<Address>,
    retailers: HashSet<Address>,
    notices: BTreeMap<NoticeId, Notice>,
    /// Notice ids per batch, creation order.
    notices_by_batch: HashMap<BatchId, Vec<NoticeId>>,
    /// (notice, account) pairs that acknowledged. Declared, never written.
    acknowledgements: HashSet<(NoticeId, Address)>,
    next_id: NoticeId,
    registry: R,
    merkle_anchor: Option<A>,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventRecorder>,
}

impl<R: BatchStateReader, A: RootAnchor> ChangeNotice<R, A> {
    /// Create a workflow owned by `owner`, with no regulator, no suppliers
    /// and no anchoring component.
    pub fn new(owner: Address, registry: R, deps: NoticeDependencies) -> Self {
        Self {
            owner,
            regulator: ZERO_ADDRESS,
            suppliers: HashSet::new(),
            retailers: HashSet::new(),
            notices: BTreeMap::new(),
            notices_by_batch: HashMap::new(),
            acknowledgements: HashSet::new(),
            next_id: 1,
            registry,
            merkle_anchor: None,
            clock: deps.clock,
            events: deps.events,
        }
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current regulator (zero when unset).
    pub fn regulator(&self) -> Address {
        self.regulator
    }

    /// Check the supplier capability.
    pub fn is_supplier(&self, account: &Address) -> bool {
        self.suppliers.contains(account)
    }

    /// Check the retailer capability.
    pub fn is_retailer(&self, account: &Address) -> bool {
        self.retailers.contains(account)
    }

    /// Check whether a root store is attached.
    pub fn has_merkle_anchor(&self) -> bool {
        self.merkle_anchor.is_some()
    }

    /// Number of notices ever drafted.
    pub fn notice_count(&self) -> usize {
        self.notices.len()
    }

    /// Check whether `account` acknowledged a notice.
    pub fn has_acknowledged(&self, notice_id: NoticeId, account: &Address) -> bool {
        self.acknowledgements.contains(&(notice_id, *account))
    }

    fn ensure_owner(&self, caller: &Address) -> Result<(), NoticeError> {
        if *caller != self.owner {
            warn!("[pl-03] Rejected owner-only call from {}", short_hex(caller));
            return Err(NoticeError::NotOwner);
        }
        Ok(())
    }

    fn ensure_regulator(&self, caller: &Address) -> Result<(), NoticeError> {
        if *caller != self.regulator {
            warn!("[pl-03] Rejected regulator-only call from {}", short_hex(caller));
            return Err(NoticeError::NotRegulator);
        }
        Ok(())
    }

    fn ensure_supplier(&self, caller: &Address) -> Result<(), NoticeError> {
        if !self.is_supplier(caller) {
            warn!("[pl-03] {} is not a supplier", short_hex(caller));
            return Err(NoticeError::NotSupplier);
        }
        Ok(())
    }

    fn notice_mut(&mut self, notice_id: NoticeId) -> Result<&mut Notice, NoticeError> {
        self.notices
            .get_mut(&notice_id)
            .ok_or(NoticeError::Missing(notice_id))
    }
}

impl<R: BatchStateReader, A: RootAnchor> ChangeNoticeApi for ChangeNotice<R, A> {
    type Anchor = A;

    fn create_notice(
        &mut self,
        caller: Address,
        params: NewNotice,
    ) -> Result<NoticeId, NoticeError> {
        self.ensure_supplier(&caller)?;
        self.registry.state_of(params.batch_id)?;
        invariant_non_empty_summary(&params.summary)?;

        let id = self.next_id;
        let notice = Notice::new(id, caller, self.clock.now(), params);
        let event = LedgerEvent::NoticeCreated {
            notice_id: id,
            batch_id: notice.batch_id,
            creator: caller,
            notice_type: notice.notice_type,
            severity: notice.severity,
            effective_from: notice.effective_from,
            anchor: notice.anchor,
        };

        self.next_id += 1;
        self.notices_by_batch
            .entry(notice.batch_id)
            .or_default()
            .push(id);
        info!(
            "[pl-03] Notice {} drafted for batch {} ({:?}, {:?})",
            id, notice.batch_id, notice.notice_type, notice.severity
        );
        self.notices.insert(id, notice);
        self.events.record(event);

        Ok(id)
    }

    fn submit(&mut self, caller: Address, notice_id: NoticeId) -> Result<(), NoticeError> {
        let is_supplier = self.is_supplier(&caller);
        let notice = self.notice_mut(notice_id)?;
        if notice.creator != caller {
            warn!(
                "[pl-03] {} tried to submit notice {} it did not create",
                short_hex(&caller),
                notice_id
            );
            return Err(NoticeError::NotCreator);
        }
        if !is_supplier {
            warn!("[pl-03] {} is not a supplier", short_hex(&caller));
            return Err(NoticeError::NotSupplier);
        }
        invariant_is_draft(notice.status)?;

        notice.submit();
        let batch_id = notice.batch_id;

        info!("[pl-03] Notice {} submitted", notice_id);
        self.events.record(LedgerEvent::NoticeSubmitted {
            notice_id,
            batch_id,
            submitter: caller,
        });
        Ok(())
    }

    fn approve(
        &mut self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), NoticeError> {
        self.ensure_regulator(&caller)?;
        let notice = self
            .notices
            .get_mut(&notice_id)
            .ok_or(NoticeError::Missing(notice_id))?;
        invariant_is_submitted(notice.status)?;
        let batch_id = notice.batch_id;

        // External write first; nothing local has changed if it fails.
        let pushed = match &self.merkle_anchor {
            Some(anchor) if notice.has_anchor() => {
                anchor.submit_root(caller, batch_id, notice.anchor)?;
                Some(notice.anchor)
            }
            _ => None,
        };

        notice.approve(note.clone());

        info!("[pl-03] Notice {} approved", notice_id);
        self.events.record(LedgerEvent::NoticeApproved {
            notice_id,
            batch_id,
            regulator: caller,
            note,
        });
        if let Some(root) = pushed {
            info!(
                "[pl-03] Anchor {} pushed for batch {}",
                short_hex(&root),
                batch_id
            );
            self.events.record(LedgerEvent::AnchorPushed {
                notice_id,
                batch_id,
                root,
            });
        }
        Ok(())
    }

    fn reject(
        &mut self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), NoticeError> {
        self.ensure_regulator(&caller)?;
        let notice = self.notice_mut(notice_id)?;
        invariant_is_submitted(notice.status)?;

        notice.reject(note.clone());
        let batch_id = notice.batch_id;

        info!("[pl-03] Notice {} rejected", notice_id);
        self.events.record(LedgerEvent::NoticeRejected {
            notice_id,
            batch_id,
            regulator: caller,
            note,
        });
        Ok(())
    }

    fn set_regulator(&mut self, caller: Address, regulator: Address) -> Result<(), NoticeError> {
        self.ensure_owner(&caller)?;
        if is_zero_address(&regulator) {
            warn!("[pl-03] Regulator cleared; approvals are unreachable until set");
        }

        let previous = std::mem::replace(&mut self.regulator, regulator);
        info!("[pl-03] Regulator set to {}", short_hex(&regulator));
        self.events.record(LedgerEvent::RegulatorChanged {
            previous,
            new: regulator,
        });
        Ok(())
    }

    fn set_supplier(
        &mut self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), NoticeError> {
        self.ensure_owner(&caller)?;
        if enabled {
            self.suppliers.insert(account);
        } else {
            self.suppliers.remove(&account);
        }
        info!("[pl-03] Supplier {} enabled={}", short_hex(&account), enabled);
        self.events
            .record(LedgerEvent::SupplierSet { account, enabled });
        Ok(())
    }

    fn set_retailer(
        &mut self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), NoticeError> {
        self.ensure_owner(&caller)?;
        if enabled {
            self.retailers.insert(account);
        } else {
            self.retailers.remove(&account);
        }
        info!("[pl-03] Retailer {} enabled={}", short_hex(&account), enabled);
        self.events
            .record(LedgerEvent::RetailerSet { account, enabled });
        Ok(())
    }

    fn set_merkle_anchor(
        &mut self,
        caller: Address,
        anchor: Option<A>,
    ) -> Result<(), NoticeError> {
        self.ensure_owner(&caller)?;
        let configured = anchor.is_some();
        self.merkle_anchor = anchor;

        info!("[pl-03] Merkle anchor configured={}", configured);
        self.events
            .record(LedgerEvent::MerkleAnchorSet { configured });
        Ok(())
    }

    fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), NoticeError> {
        self.ensure_owner(&caller)?;
        if is_zero_address(&new_owner) {
            return Err(NoticeError::BadInput("owner is zero"));
        }

        let previous = std::mem::replace(&mut self.owner, new_owner);
        info!("[pl-03] Ownership transferred to {}", short_hex(&new_owner));
        self.events.record(LedgerEvent::OwnershipTransferred {
            component: Component::ChangeNotice,
            previous,
            new: new_owner,
        });
        Ok(())
    }

    fn get_notice(&self, notice_id: NoticeId) -> Result<&Notice, NoticeError> {
        self.notices
            .get(&notice_id)
            .ok_or(NoticeError::Missing(notice_id))
    }

    fn notices_for_batch(&self, batch_id: BatchId) -> &[NoticeId] {
        self.notices_by_batch
            .get(&batch_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn anchor_verified_on_merkle(&self, notice_id: NoticeId) -> Result<bool, NoticeError> {
        let notice = self.get_notice(notice_id)?;
        let verified = match &self.merkle_anchor {
            Some(anchor) if notice.has_anchor() => {
                anchor.verify_root(notice.batch_id, &notice.anchor)
            }
            _ => false,
        };
        debug!("[pl-03] Notice {} anchor verified={}", notice_id, verified);
        Ok(verified)
    }
}
