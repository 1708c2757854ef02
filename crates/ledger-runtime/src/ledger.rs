//! # Ledger Sequencer
//!
//! Owns one instance of each subsystem and applies every mutating call as a
//! single atomic unit in one global order:
//!
//! ```text
//! caller ──→ sequencer lock ──→ begin unit ──→ subsystem op
//!                                                 │
//!                                 Ok ──→ commit unit (events durable)
//!                                 Err ─→ discard unit (no events)
//! ```
//!
//! Subsystems check every precondition before mutating, so a failed call has
//! neither state changes nor records. The sequencer is a read-write lock:
//! units hold it exclusively until their records are committed, and every
//! query holds it shared, so no reader sees state ahead of its record.
//!
//! ## Lock Order
//!
//! notices → anchor → registry. No path acquires them in the other
//! direction.

use crate::commands::{CommandOutcome, LedgerCommand};
use crate::config::{ConfigError, LedgerConfig};
use crate::views::{AuditLog, StoreView};
use parking_lot::{RwLock, RwLockReadGuard};
use pl_01_batch_registry::{
    Batch, BatchRegistry, BatchRegistryApi, RegistryDependencies, RegistryError, SharedRegistry,
};
use pl_02_merkle_anchor::{
    AnchorDependencies, AnchorError, MerkleAnchor, MerkleAnchorApi, SharedAnchor,
};
use pl_03_change_notice::{
    ChangeNotice, ChangeNoticeApi, NewNotice, Notice, NoticeDependencies, NoticeError,
};
use shared_bus::{BusError, EventLog};
use shared_types::{
    is_zero_address, Address, BatchId, BatchState, ErrorKind, Hash, NoticeId, SystemTimeSource,
    TimeSource,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Anchor store as wired in the ledger.
pub type LedgerAnchor = SharedAnchor<SharedRegistry>;

/// Notice workflow as wired in the ledger.
pub type LedgerNotices = ChangeNotice<SharedRegistry, LedgerAnchor>;

/// Any failure of a ledger call.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration rejected at startup.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// Registry rejected the call.
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),

    /// Anchor store rejected the call.
    #[error("anchor: {0}")]
    Anchor(#[from] AnchorError),

    /// Notice workflow rejected the call.
    #[error("notice: {0}")]
    Notice(#[from] NoticeError),

    /// Event log failure.
    #[error("event log: {0}")]
    Bus(#[from] BusError),
}

impl LedgerError {
    /// Failure category, for subsystem rejections.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Registry(e) => Some(e.kind()),
            Self::Anchor(e) => Some(e.kind()),
            Self::Notice(e) => Some(e.kind()),
            Self::Config(_) | Self::Bus(_) => None,
        }
    }
}

/// The three subsystems behind one sequencer.
pub struct Ledger {
    config: LedgerConfig,
    /// Exclusive for the whole of every unit, shared for queries.
    sequencer: RwLock<()>,
    events: Arc<EventLog>,
    registry: SharedRegistry,
    anchor: LedgerAnchor,
    notices: RwLock<LedgerNotices>,
}

impl Ledger {
    /// Build a ledger on the system clock.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }

    /// Build a ledger on an injected clock.
    ///
    /// ## Startup
    ///
    /// 1. Validate configuration
    /// 2. Create the event log and the three subsystems (leaf first)
    /// 3. As owner, set the configured regulator and attach the anchor store,
    ///    recorded as one unit
    pub fn with_clock(
        config: LedgerConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, LedgerError> {
        config.validate()?;
        info!("Starting provenance ledger");

        let events = Arc::new(EventLog::with_capacity(config.event_channel_capacity));

        let registry = SharedRegistry::new(BatchRegistry::new(
            config.owner,
            config.operator,
            RegistryDependencies {
                clock: clock.clone(),
                events: events.clone(),
            },
        ));
        let anchor = SharedAnchor::new(MerkleAnchor::new(
            registry.clone(),
            AnchorDependencies {
                clock: clock.clone(),
                events: events.clone(),
            },
        ));
        let notices = ChangeNotice::new(
            config.owner,
            registry.clone(),
            NoticeDependencies {
                clock,
                events: events.clone(),
            },
        );

        let ledger = Self {
            config,
            sequencer: RwLock::new(()),
            events,
            registry,
            anchor,
            notices: RwLock::new(notices),
        };
        ledger.bootstrap()?;
        Ok(ledger)
    }

    fn bootstrap(&self) -> Result<(), LedgerError> {
        let owner = self.config.owner;
        let regulator = self.config.regulator;
        let attach = self.config.anchor_on_approval;
        self.apply(|| {
            let mut notices = self.notices.write();
            if !is_zero_address(&regulator) {
                notices.set_regulator(owner, regulator)?;
            }
            if attach {
                notices.set_merkle_anchor(owner, Some(self.anchor.clone()))?;
            }
            Ok::<_, NoticeError>(())
        })
    }

    /// Run `op` as one atomic unit under the sequencer.
    fn apply<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, LedgerError>
    where
        LedgerError: From<E>,
    {
        let _turn = self.sequencer.write();
        let unit = self.events.begin_unit()?;
        match op() {
            Ok(value) => {
                let committed = unit.commit();
                debug!(committed, "Unit committed");
                Ok(value)
            }
            Err(e) => {
                let dropped = unit.rollback();
                let err = LedgerError::from(e);
                warn!(dropped, error = %err, "Unit rolled back");
                Err(err)
            }
        }
    }

    // =========================================================================
    // BATCH REGISTRY
    // =========================================================================

    /// Register a batch.
    pub fn create_batch(
        &self,
        caller: Address,
        external_id: Hash,
        metadata_uri: String,
        metadata_hash: Hash,
    ) -> Result<BatchId, LedgerError> {
        self.apply(|| {
            self.registry
                .write()
                .create_batch(caller, external_id, metadata_uri, metadata_hash)
        })
    }

    /// Move a batch along the lifecycle table.
    pub fn advance_lifecycle(
        &self,
        caller: Address,
        batch_id: BatchId,
        state: BatchState,
    ) -> Result<(), LedgerError> {
        self.apply(|| {
            self.registry
                .write()
                .advance_lifecycle(caller, batch_id, state)
        })
    }

    /// Recall a non-terminal batch.
    pub fn recall(
        &self,
        caller: Address,
        batch_id: BatchId,
        reason: String,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.registry.write().recall(caller, batch_id, reason))
    }

    /// Replace a batch's metadata pointer.
    pub fn update_metadata(
        &self,
        caller: Address,
        batch_id: BatchId,
        metadata_uri: String,
        metadata_hash: Hash,
    ) -> Result<(), LedgerError> {
        self.apply(|| {
            self.registry
                .write()
                .update_metadata(caller, batch_id, metadata_uri, metadata_hash)
        })
    }

    /// Designate the registry operator.
    pub fn set_operator(&self, caller: Address, operator: Address) -> Result<(), LedgerError> {
        self.apply(|| self.registry.write().set_operator(caller, operator))
    }

    /// Hand over the registry.
    pub fn transfer_registry_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.registry.write().transfer_ownership(caller, new_owner))
    }

    // =========================================================================
    // MERKLE ANCHOR
    // =========================================================================

    /// Declare a root for a batch. Open to any caller.
    pub fn submit_root(
        &self,
        caller: Address,
        batch_id: BatchId,
        root: Hash,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.anchor.write().submit_root(caller, batch_id, root))
    }

    // =========================================================================
    // CHANGE NOTICE
    // =========================================================================

    /// Draft a notice.
    pub fn create_notice(
        &self,
        caller: Address,
        params: NewNotice,
    ) -> Result<NoticeId, LedgerError> {
        self.apply(|| self.notices.write().create_notice(caller, params))
    }

    /// Submit a draft.
    pub fn submit_notice(&self, caller: Address, notice_id: NoticeId) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().submit(caller, notice_id))
    }

    /// Approve a submitted notice, pushing its anchor when configured.
    pub fn approve_notice(
        &self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().approve(caller, notice_id, note))
    }

    /// Reject a submitted notice.
    pub fn reject_notice(
        &self,
        caller: Address,
        notice_id: NoticeId,
        note: String,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().reject(caller, notice_id, note))
    }

    /// Replace the regulator.
    pub fn set_regulator(&self, caller: Address, regulator: Address) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().set_regulator(caller, regulator))
    }

    /// Grant or revoke the supplier capability.
    pub fn set_supplier(
        &self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().set_supplier(caller, account, enabled))
    }

    /// Grant or revoke the retailer capability.
    pub fn set_retailer(
        &self,
        caller: Address,
        account: Address,
        enabled: bool,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().set_retailer(caller, account, enabled))
    }

    /// Attach (`true`) or detach the ledger's anchor store.
    pub fn set_merkle_anchor(&self, caller: Address, enabled: bool) -> Result<(), LedgerError> {
        let anchor = enabled.then(|| self.anchor.clone());
        self.apply(|| self.notices.write().set_merkle_anchor(caller, anchor))
    }

    /// Hand over the notice workflow.
    pub fn transfer_notice_ownership(
        &self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), LedgerError> {
        self.apply(|| self.notices.write().transfer_ownership(caller, new_owner))
    }

    // =========================================================================
    // COMMANDS
    // =========================================================================

    /// Apply one replay command.
    pub fn execute(&self, command: LedgerCommand) -> Result<CommandOutcome, LedgerError> {
        let applied = |r: Result<(), LedgerError>| r.map(|()| CommandOutcome::Applied);
        match command {
            LedgerCommand::CreateBatch {
                caller,
                external_id,
                metadata_uri,
                metadata_hash,
            } => self
                .create_batch(caller, external_id, metadata_uri, metadata_hash)
                .map(|batch_id| CommandOutcome::BatchCreated { batch_id }),
            LedgerCommand::AdvanceLifecycle {
                caller,
                batch_id,
                state,
            } => applied(self.advance_lifecycle(caller, batch_id, state)),
            LedgerCommand::Recall {
                caller,
                batch_id,
                reason,
            } => applied(self.recall(caller, batch_id, reason)),
            LedgerCommand::UpdateMetadata {
                caller,
                batch_id,
                metadata_uri,
                metadata_hash,
            } => applied(self.update_metadata(caller, batch_id, metadata_uri, metadata_hash)),
            LedgerCommand::SetOperator { caller, operator } => {
                applied(self.set_operator(caller, operator))
            }
            LedgerCommand::TransferRegistryOwnership { caller, new_owner } => {
                applied(self.transfer_registry_ownership(caller, new_owner))
            }
            LedgerCommand::SubmitRoot {
                caller,
                batch_id,
                root,
            } => applied(self.submit_root(caller, batch_id, root)),
            LedgerCommand::CreateNotice {
                caller,
                batch_id,
                notice_type,
                severity,
                effective_from,
                summary,
                details_uri,
                anchor,
            } => {
                let params = NewNotice {
                    batch_id,
                    notice_type,
                    severity,
                    effective_from,
                    summary,
                    details_uri,
                    anchor,
                };
                self.create_notice(caller, params)
                    .map(|notice_id| CommandOutcome::NoticeCreated { notice_id })
            }
            LedgerCommand::SubmitNotice { caller, notice_id } => {
                applied(self.submit_notice(caller, notice_id))
            }
            LedgerCommand::ApproveNotice {
                caller,
                notice_id,
                note,
            } => applied(self.approve_notice(caller, notice_id, note)),
            LedgerCommand::RejectNotice {
                caller,
                notice_id,
                note,
            } => applied(self.reject_notice(caller, notice_id, note)),
            LedgerCommand::SetRegulator { caller, regulator } => {
                applied(self.set_regulator(caller, regulator))
            }
            LedgerCommand::SetSupplier {
                caller,
                account,
                enabled,
            } => applied(self.set_supplier(caller, account, enabled)),
            LedgerCommand::SetRetailer {
                caller,
                account,
                enabled,
            } => applied(self.set_retailer(caller, account, enabled)),
            LedgerCommand::SetMerkleAnchor { caller, enabled } => {
                applied(self.set_merkle_anchor(caller, enabled))
            }
            LedgerCommand::TransferNoticeOwnership { caller, new_owner } => {
                applied(self.transfer_notice_ownership(caller, new_owner))
            }
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Shared sequencer turn for queries. Recursive so a caller holding a
    /// view can run further queries while a unit is queued.
    fn read_turn(&self) -> RwLockReadGuard<'_, ()> {
        self.sequencer.read_recursive()
    }

    /// Committed event records.
    pub fn events(&self) -> AuditLog<'_> {
        AuditLog::new(&self.events)
    }

    /// Read view of the registry.
    pub fn registry(&self) -> StoreView<'_, BatchRegistry> {
        StoreView::new(self.read_turn(), self.registry.read())
    }

    /// Read view of the anchor store.
    pub fn anchor(&self) -> StoreView<'_, MerkleAnchor<SharedRegistry>> {
        StoreView::new(self.read_turn(), self.anchor.read())
    }

    /// Read view of the notice workflow.
    pub fn notices(&self) -> StoreView<'_, LedgerNotices> {
        StoreView::new(self.read_turn(), self.notices.read())
    }

    /// Full batch record.
    pub fn batch(&self, batch_id: BatchId) -> Result<Batch, RegistryError> {
        self.registry().get_batch(batch_id).cloned()
    }

    /// Bare lifecycle state.
    pub fn batch_state(&self, batch_id: BatchId) -> Result<BatchState, RegistryError> {
        self.registry().get_state(batch_id)
    }

    /// Check whether a batch is terminal.
    pub fn is_terminal(&self, batch_id: BatchId) -> Result<bool, RegistryError> {
        self.registry().is_terminal(batch_id)
    }

    /// Root on file for a batch (zero when none).
    pub fn root(&self, batch_id: BatchId) -> Hash {
        self.anchor().get_root(batch_id)
    }

    /// Equality check against the stored root.
    pub fn verify_root(&self, batch_id: BatchId, proposed: &Hash) -> bool {
        self.anchor().verify_root(batch_id, proposed)
    }

    /// Full notice record.
    pub fn notice(&self, notice_id: NoticeId) -> Result<Notice, NoticeError> {
        self.notices().get_notice(notice_id).cloned()
    }

    /// Notice ids for a batch in creation order.
    pub fn notices_for_batch(&self, batch_id: BatchId) -> Vec<NoticeId> {
        self.notices().notices_for_batch(batch_id).to_vec()
    }

    /// Compare a notice's anchor with the root store.
    pub fn anchor_verified_on_merkle(&self, notice_id: NoticeId) -> Result<bool, NoticeError> {
        self.notices().anchor_verified_on_merkle(notice_id)
    }

    /// Current regulator.
    pub fn regulator(&self) -> Address {
        self.notices().regulator()
    }

    /// Check the supplier capability.
    pub fn is_supplier(&self, account: &Address) -> bool {
        self.notices().is_supplier(account)
    }
}
