//! # Test Utilities
//!
//! Deterministic clocks, a map-backed registry reader and identity helpers
//! used by the unit and integration tests of every subsystem.

use crate::entities::{Address, BatchId, BatchState, Hash, Timestamp};
use crate::errors::BatchLookupError;
use crate::ports::{BatchStateReader, TimeSource};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Base timestamp used by test clocks (2023-11-14T22:13:20Z).
pub const TEST_EPOCH: Timestamp = 1_700_000_000;

/// Build a non-zero test address whose last byte is `n`.
pub fn test_address(n: u8) -> Address {
    let mut addr = [0xA0; 20];
    addr[19] = n;
    addr
}

/// Build a non-zero test hash whose last byte is `n`.
pub fn test_hash(n: u8) -> Hash {
    let mut hash = [0x5A; 32];
    hash[31] = n;
    hash
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedTimeSource {
    now: AtomicU64,
}

impl FixedTimeSource {
    /// Create a clock frozen at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Set current time for testing.
    pub fn set_time(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advance time for testing.
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Default for FixedTimeSource {
    fn default() -> Self {
        Self::new(TEST_EPOCH)
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

/// Map-backed `BatchStateReader` for subsystems tested without a registry.
#[derive(Debug, Default)]
pub struct InMemoryBatchReader {
    states: RwLock<HashMap<BatchId, BatchState>>,
}

impl InMemoryBatchReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader that knows the given batches.
    pub fn with_batches(batches: &[(BatchId, BatchState)]) -> Self {
        let reader = Self::new();
        for (id, state) in batches {
            reader.insert(*id, *state);
        }
        reader
    }

    /// Register or overwrite a batch.
    pub fn insert(&self, batch_id: BatchId, state: BatchState) {
        self.states.write().insert(batch_id, state);
    }
}

impl BatchStateReader for InMemoryBatchReader {
    fn state_of(&self, batch_id: BatchId) -> Result<BatchState, BatchLookupError> {
        self.states
            .read()
            .get(&batch_id)
            .copied()
            .ok_or(BatchLookupError::NotFound(batch_id))
    }
}
