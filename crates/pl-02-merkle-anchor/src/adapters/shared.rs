//! Shared anchor handle.

use crate::service::MerkleAnchor;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared_types::BatchStateReader;
use std::sync::Arc;

/// Cloneable handle over one `MerkleAnchor`.
///
/// Clones share the same root store, so a root pushed through one clone is
/// visible through every other.
pub struct SharedAnchor<R: BatchStateReader> {
    inner: Arc<RwLock<MerkleAnchor<R>>>,
}

impl<R: BatchStateReader> SharedAnchor<R> {
    /// Wrap an anchor store.
    pub fn new(anchor: MerkleAnchor<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(anchor)),
        }
    }

    /// Acquire a read guard.
    pub fn read(&self) -> RwLockReadGuard<'_, MerkleAnchor<R>> {
        self.inner.read()
    }

    /// Acquire a write guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, MerkleAnchor<R>> {
        self.inner.write()
    }

    /// Check whether two handles point at the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Manual impl: `R` itself need not be `Clone`.
impl<R: BatchStateReader> Clone for SharedAnchor<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
