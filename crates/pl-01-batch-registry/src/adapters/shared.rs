//! Shared registry handle.

use crate::service::BatchRegistry;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared_types::{BatchId, BatchLookupError, BatchState, BatchStateReader};
use std::sync::Arc;

/// Cloneable handle over one `BatchRegistry`.
///
/// Clones share the same registry. The anchor and notice subsystems hold a
/// clone as their `BatchStateReader`.
#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<BatchRegistry>>,
}

impl SharedRegistry {
    /// Wrap a registry.
    pub fn new(registry: BatchRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Acquire a read guard.
    pub fn read(&self) -> RwLockReadGuard<'_, BatchRegistry> {
        self.inner.read()
    }

    /// Acquire a write guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, BatchRegistry> {
        self.inner.write()
    }
}

impl BatchStateReader for SharedRegistry {
    fn state_of(&self, batch_id: BatchId) -> Result<BatchState, BatchLookupError> {
        self.inner.read().state_of(batch_id)
    }
}
