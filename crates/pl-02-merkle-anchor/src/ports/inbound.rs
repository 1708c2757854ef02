//! # Inbound Ports

use crate::domain::AnchorError;
use shared_types::{Address, BatchId, Hash};

/// Merkle anchor API - inbound port.
pub trait MerkleAnchorApi: Send + Sync {
    /// Run every precondition of `submit_root` without storing anything.
    fn check_submission(&self, batch_id: BatchId, root: &Hash) -> Result<(), AnchorError>;

    /// Declare `root` for `batch_id`, replacing any previous root.
    ///
    /// Open to any caller; `submitter` is recorded, never checked.
    fn submit_root(
        &mut self,
        submitter: Address,
        batch_id: BatchId,
        root: Hash,
    ) -> Result<(), AnchorError>;

    /// Stored root, or the zero hash if none was ever submitted.
    fn get_root(&self, batch_id: BatchId) -> Hash;

    /// Equality check against the stored root. False when nothing is stored.
    fn verify_root(&self, batch_id: BatchId, proposed: &Hash) -> bool;
}
