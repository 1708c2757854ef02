//! # Cross-Subsystem Ports
//!
//! Interfaces one subsystem consumes from another. Subsystems depend on these
//! traits, never on each other's internals.

use crate::entities::{BatchId, BatchState, Timestamp};
use crate::errors::BatchLookupError;
use std::sync::Arc;

/// Registry lookup consumed by the anchor and notice subsystems.
///
/// This is the sole coupling point into the batch registry.
pub trait BatchStateReader: Send + Sync {
    /// Current lifecycle state of a batch.
    ///
    /// Fails with `BatchLookupError::NotFound` if the batch was never created.
    fn state_of(&self, batch_id: BatchId) -> Result<BatchState, BatchLookupError>;

    /// Check whether a batch exists.
    fn batch_exists(&self, batch_id: BatchId) -> bool {
        self.state_of(batch_id).is_ok()
    }
}

impl<T: BatchStateReader + ?Sized> BatchStateReader for Arc<T> {
    fn state_of(&self, batch_id: BatchId) -> Result<BatchState, BatchLookupError> {
        (**self).state_of(batch_id)
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}

/// Default time source using system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
