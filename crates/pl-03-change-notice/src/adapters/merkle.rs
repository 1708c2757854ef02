//! `RootAnchor` over the shared Merkle anchor handle.

use crate::ports::RootAnchor;
use pl_02_merkle_anchor::{AnchorError, MerkleAnchorApi, SharedAnchor};
use shared_types::{Address, BatchId, BatchStateReader, Hash};
use tracing::debug;

impl<R: BatchStateReader> RootAnchor for SharedAnchor<R> {
    fn submit_root(
        &self,
        submitter: Address,
        batch_id: BatchId,
        root: Hash,
    ) -> Result<(), AnchorError> {
        debug!("[pl-03] Pushing root for batch {} to anchor store", batch_id);
        self.write().submit_root(submitter, batch_id, root)
    }

    fn verify_root(&self, batch_id: BatchId, root: &Hash) -> bool {
        self.read().verify_root(batch_id, root)
    }
}
