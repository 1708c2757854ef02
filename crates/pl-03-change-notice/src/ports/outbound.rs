//! # Outbound Ports
//!
//! Dependencies the workflow consumes from other subsystems.

use pl_02_merkle_anchor::AnchorError;
use shared_types::{Address, BatchId, Hash};

/// Root store the workflow pushes approved anchors into - outbound port.
pub trait RootAnchor: Send + Sync {
    /// Declare `root` for `batch_id`.
    fn submit_root(
        &self,
        submitter: Address,
        batch_id: BatchId,
        root: Hash,
    ) -> Result<(), AnchorError>;

    /// Check whether `root` is the one on file for `batch_id`.
    fn verify_root(&self, batch_id: BatchId, root: &Hash) -> bool;
}
