//! # Domain Entities
//!
//! The batch record owned by the registry.

use super::errors::RegistryError;
use super::invariants::invariant_transition_allowed;
use serde::{Deserialize, Serialize};
use shared_types::{Address, BatchId, BatchState, Hash, Timestamp};

/// A tracked production lot.
///
/// Identity fields are fixed at creation. Only `state` and the metadata
/// pointer (`metadata_uri`, `metadata_hash`) change afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Sequential identifier.
    pub id: BatchId,
    /// Account that registered the batch.
    pub creator: Address,
    /// Registration time.
    pub created_at: Timestamp,
    /// Externally supplied opaque identifier (globally unique).
    pub external_id: Hash,
    /// Where the metadata document lives.
    pub metadata_uri: String,
    /// Content hash of the metadata document (globally unique).
    pub metadata_hash: Hash,
    /// Current lifecycle state.
    pub state: BatchState,
}

/// Parameters for registering a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBatch {
    /// Externally supplied opaque identifier.
    pub external_id: Hash,
    /// Where the metadata document lives.
    pub metadata_uri: String,
    /// Content hash of the metadata document.
    pub metadata_hash: Hash,
}

impl Batch {
    /// Create a freshly registered batch.
    pub fn new(id: BatchId, creator: Address, created_at: Timestamp, params: NewBatch) -> Self {
        Self {
            id,
            creator,
            created_at,
            external_id: params.external_id,
            metadata_uri: params.metadata_uri,
            metadata_hash: params.metadata_hash,
            state: BatchState::Registered,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Move along the lifecycle table.
    ///
    /// Returns the previous state.
    pub fn transition_to(&mut self, new_state: BatchState) -> Result<BatchState, RegistryError> {
        invariant_transition_allowed(self.id, self.state, new_state)?;
        let previous = self.state;
        self.state = new_state;
        Ok(previous)
    }

    /// Force the batch into `Recalled`.
    ///
    /// Returns the previous state.
    pub fn recall(&mut self) -> Result<BatchState, RegistryError> {
        if self.is_terminal() {
            return Err(RegistryError::AlreadyTerminal {
                batch_id: self.id,
                state: self.state,
            });
        }
        let previous = self.state;
        self.state = BatchState::Recalled;
        Ok(previous)
    }
}
