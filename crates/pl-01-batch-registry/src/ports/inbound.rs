//! # Inbound Ports
//!
//! API trait defining what the Batch Registry can do.

use crate::domain::{Batch, RegistryError};
use shared_types::{Address, BatchId, BatchState, Hash};

/// Batch registry API - inbound port.
///
/// Every mutating call names its `caller`; authorization is decided from it.
pub trait BatchRegistryApi: Send + Sync {
    /// Register a batch. Open to any caller.
    fn create_batch(
        &mut self,
        caller: Address,
        external_id: Hash,
        metadata_uri: String,
        metadata_hash: Hash,
    ) -> Result<BatchId, RegistryError>;

    /// Move a batch along the lifecycle table (operator only).
    fn advance_lifecycle(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        new_state: BatchState,
    ) -> Result<(), RegistryError>;

    /// Force a non-terminal batch into `Recalled` (operator only).
    fn recall(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        reason: String,
    ) -> Result<(), RegistryError>;

    /// Replace the metadata pointer and hash (operator only).
    fn update_metadata(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        new_uri: String,
        new_hash: Hash,
    ) -> Result<(), RegistryError>;

    /// Designate a new operator (owner only).
    fn set_operator(&mut self, caller: Address, new_operator: Address)
        -> Result<(), RegistryError>;

    /// Hand ownership to another account (owner only).
    fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError>;

    /// Full batch record.
    fn get_batch(&self, batch_id: BatchId) -> Result<&Batch, RegistryError>;

    /// Check whether a batch is in a terminal state.
    fn is_terminal(&self, batch_id: BatchId) -> Result<bool, RegistryError>;

    /// Bare lifecycle state.
    fn get_state(&self, batch_id: BatchId) -> Result<BatchState, RegistryError>;
}
