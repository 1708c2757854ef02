//! # Read Views
//!
//! Read-only access to the ledger's stores and its event log.
//!
//! A `StoreView` holds the sequencer in shared mode for as long as it lives,
//! so it only ever shows state whose records are already committed. Mutating
//! subsystem methods take `&mut self` and are unreachable through a view.

use parking_lot::RwLockReadGuard;
use shared_bus::{BusError, EventFilter, EventLog, LedgerRecord, Subscription};
use shared_types::{BatchId, NoticeId};
use std::ops::Deref;

/// Shared borrow of one subsystem, taken between two ledger units.
pub struct StoreView<'a, T> {
    // Released before the sequencer turn.
    store: RwLockReadGuard<'a, T>,
    _turn: RwLockReadGuard<'a, ()>,
}

impl<'a, T> StoreView<'a, T> {
    pub(crate) fn new(turn: RwLockReadGuard<'a, ()>, store: RwLockReadGuard<'a, T>) -> Self {
        Self { store, _turn: turn }
    }
}

impl<T> Deref for StoreView<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.store
    }
}

/// Query side of the ledger's event log.
///
/// Records are only added by ledger units, which commit before their state
/// becomes readable.
#[derive(Clone, Copy)]
pub struct AuditLog<'a> {
    log: &'a EventLog,
}

impl<'a> AuditLog<'a> {
    pub(crate) fn new(log: &'a EventLog) -> Self {
        Self { log }
    }

    /// All committed records in order.
    pub fn records(&self) -> Vec<LedgerRecord> {
        self.log.records()
    }

    /// Committed records with a sequence strictly greater than `sequence`.
    pub fn records_since(&self, sequence: u64) -> Vec<LedgerRecord> {
        self.log.records_since(sequence)
    }

    /// Committed records matching a filter.
    pub fn matching(&self, filter: &EventFilter) -> Vec<LedgerRecord> {
        self.log.matching(filter)
    }

    /// Committed records concerning a batch.
    pub fn records_for_batch(&self, batch_id: BatchId) -> Vec<LedgerRecord> {
        self.log.records_for_batch(batch_id)
    }

    /// Committed records concerning a notice.
    pub fn records_for_notice(&self, notice_id: NoticeId) -> Vec<LedgerRecord> {
        self.log.records_for_notice(notice_id)
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Check if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Committed records as JSON lines.
    pub fn export_json_lines(&self) -> Result<String, BusError> {
        self.log.export_json_lines()
    }

    /// Live feed of records committed from now on.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.log.subscribe(filter)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.log.subscriber_count()
    }
}
