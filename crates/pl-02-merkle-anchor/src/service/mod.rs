//! # Merkle Anchor Service
//!
//! Stores the latest declared root per batch. The registry is consulted only
//! to confirm the batch exists.


use crate::domain::{AnchorError, RootEntry};
use crate::ports::MerkleAnchorApi;
use shared_bus::{EventRecorder, LedgerEvent};
use shared_types::{
    is_zero_hash, short_hex, Address, BatchId, BatchStateReader, Hash, TimeSource, ZERO_HASH,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Dependencies for MerkleAnchor.
pub struct AnchorDependencies {
    /// Source of submission timestamps.
    pub clock: Arc<dyn TimeSource>,
    /// Audit record sink.
    pub events: Arc<dyn EventRecorder>,
}

/// The Merkle anchor store.
pub struct MerkleAnchor<R: BatchStateReader> {
    registry: R,
    roots: HashMap<BatchId, RootEntry>,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventRecorder>,
}

impl<R: BatchStateReader> MerkleAnchor<R> {
    /// Create an empty store bound to `registry`.
    pub fn new(registry: R, deps: AnchorDependencies) -> Self {
        Self {
            registry,
            roots: HashMap::new(),
            clock: deps.clock,
            events: deps.events,
        }
    }

    /// Full entry for a batch, if any root was submitted.
    pub fn root_entry(&self, batch_id: BatchId) -> Option<&RootEntry> {
        self.roots.get(&batch_id)
    }

    /// Number of batches with a root on file.
    pub fn anchored_batch_count(&self) -> usize {
        self.roots.len()
    }
}

impl<R: BatchStateReader> MerkleAnchorApi for MerkleAnchor<R> {
    fn check_submission(&self, batch_id: BatchId, root: &Hash) -> Result<(), AnchorError> {
        if is_zero_hash(root) {
            return Err(AnchorError::ZeroRoot);
        }
        self.registry.state_of(batch_id)?;
        Ok(())
    }

    fn submit_root(
        &mut self,
        submitter: Address,
        batch_id: BatchId,
        root: Hash,
    ) -> Result<(), AnchorError> {
        self.check_submission(batch_id, &root)?;

        let entry = RootEntry {
            root,
            submitter,
            submitted_at: self.clock.now(),
        };
        if let Some(previous) = self.roots.insert(batch_id, entry) {
            debug!(
                "[pl-02] Batch {} root {} replaced",
                batch_id,
                short_hex(&previous.root)
            );
        }

        info!(
            "[pl-02] Root {} anchored for batch {} by {}",
            short_hex(&root),
            batch_id,
            short_hex(&submitter)
        );
        self.events.record(LedgerEvent::RootSubmitted {
            batch_id,
            root,
            submitter,
        });
        Ok(())
    }

    fn get_root(&self, batch_id: BatchId) -> Hash {
        self.roots
            .get(&batch_id)
            .map_or(ZERO_HASH, |entry| entry.root)
    }

    fn verify_root(&self, batch_id: BatchId, proposed: &Hash) -> bool {
        self.roots
            .get(&batch_id)
            .is_some_and(|entry| entry.root == *proposed)
    }
}
