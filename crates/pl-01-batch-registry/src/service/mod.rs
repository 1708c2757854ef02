//! # Batch Registry Service
//!
//! The main service implementing `BatchRegistryApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Owns every batch record and both used-value sets
//! 2. Checks all preconditions before the first mutation
//! 3. Emits one audit record per accepted fact
//! 4. Uses dependency injection for the clock and the event recorder


use crate::domain::entities::NewBatch;
use crate::domain::invariants::{
    invariant_fresh_external_id, invariant_fresh_metadata_hash, invariant_non_empty_uri,
    invariant_non_zero_address, invariant_non_zero_hash,
};
use crate::domain::{Batch, RegistryError};
use crate::ports::BatchRegistryApi;
use shared_bus::{Component, EventRecorder, LedgerEvent};
use shared_types::{
    short_hex, Address, BatchId, BatchLookupError, BatchState, BatchStateReader, Hash, TimeSource,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dependencies for BatchRegistry.
pub struct RegistryDependencies {
    /// Source of creation timestamps.
    pub clock: Arc<dyn TimeSource>,
    /// Audit record sink.
    pub events: Arc<dyn EventRecorder>,
}

/// The Batch Registry.
pub struct BatchRegistry {
    /// Deployer identity; sets the operator.
    owner: Address,
    /// Identity allowed to mutate lifecycle and metadata.
    operator: Address,
    /// Batches by id.
    batches: BTreeMap<BatchId, Batch>,
    /// Every external id ever registered.
    used_external_ids: HashSet<Hash>,
    /// Every metadata hash ever registered or set.
    used_metadata_hashes: HashSet<Hash>,
    /// Next id to allocate.
    next_id: BatchId,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventRecorder>,
}

impl BatchRegistry {
    /// Create a registry owned by `owner` with `operator` designated.
    pub fn new(owner: Address, operator: Address, deps: RegistryDependencies) -> Self {
        Self {
            owner,
            operator,
            batches: BTreeMap::new(),
            used_external_ids: HashSet::new(),
            used_metadata_hashes: HashSet::new(),
            next_id: 1,
            clock: deps.clock,
            events: deps.events,
        }
    }

    /// Current owner.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Current operator.
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Number of batches ever created.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Check whether an external id has ever been registered.
    pub fn is_external_id_used(&self, external_id: &Hash) -> bool {
        self.used_external_ids.contains(external_id)
    }

    /// Check whether a metadata hash has ever been registered or set.
    pub fn is_metadata_hash_used(&self, hash: &Hash) -> bool {
        self.used_metadata_hashes.contains(hash)
    }

    /// Check a move against the lifecycle table without touching any batch.
    pub fn can_transition(&self, from: BatchState, to: BatchState) -> bool {
        from.can_transition_to(to)
    }

    fn ensure_owner(&self, caller: &Address) -> Result<(), RegistryError> {
        if *caller != self.owner {
            warn!("[pl-01] Rejected owner-only call from {}", short_hex(caller));
            return Err(RegistryError::NotOwner);
        }
        Ok(())
    }

    fn ensure_operator(&self, caller: &Address) -> Result<(), RegistryError> {
        if *caller != self.operator {
            warn!("[pl-01] Rejected operator-only call from {}", short_hex(caller));
            return Err(RegistryError::NotOperator);
        }
        Ok(())
    }

    fn batch_mut(&mut self, batch_id: BatchId) -> Result<&mut Batch, RegistryError> {
        self.batches
            .get_mut(&batch_id)
            .ok_or(RegistryError::NotFound(batch_id))
    }
}

impl BatchRegistryApi for BatchRegistry {
    fn create_batch(
        &mut self,
        caller: Address,
        external_id: Hash,
        metadata_uri: String,
        metadata_hash: Hash,
    ) -> Result<BatchId, RegistryError> {
        invariant_non_zero_hash(&external_id, "external id is zero")?;
        invariant_non_zero_hash(&metadata_hash, "metadata hash is zero")?;
        invariant_non_empty_uri(&metadata_uri)?;
        invariant_fresh_external_id(&self.used_external_ids, &external_id)?;
        invariant_fresh_metadata_hash(&self.used_metadata_hashes, &metadata_hash)?;

        let id = self.next_id;
        let created_at = self.clock.now();
        let batch = Batch::new(
            id,
            caller,
            created_at,
            NewBatch {
                external_id,
                metadata_uri: metadata_uri.clone(),
                metadata_hash,
            },
        );

        self.next_id += 1;
        self.used_external_ids.insert(external_id);
        self.used_metadata_hashes.insert(metadata_hash);
        self.batches.insert(id, batch);

        info!(
            "[pl-01] Batch {} registered (external id {})",
            id,
            short_hex(&external_id)
        );
        self.events.record(LedgerEvent::BatchCreated {
            batch_id: id,
            creator: caller,
            external_id,
            metadata_uri,
            metadata_hash,
            created_at,
        });

        Ok(id)
    }

    fn advance_lifecycle(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        new_state: BatchState,
    ) -> Result<(), RegistryError> {
        self.ensure_operator(&caller)?;
        let batch = self.batch_mut(batch_id)?;
        let from = batch.transition_to(new_state)?;

        info!("[pl-01] Batch {} {} -> {}", batch_id, from, new_state);
        self.events.record(LedgerEvent::LifecycleAdvanced {
            batch_id,
            from,
            to: new_state,
        });
        Ok(())
    }

    fn recall(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        reason: String,
    ) -> Result<(), RegistryError> {
        self.ensure_operator(&caller)?;
        let batch = self.batch_mut(batch_id)?;
        let from = batch.recall()?;

        info!("[pl-01] Batch {} recalled from {}: {}", batch_id, from, reason);
        self.events
            .record(LedgerEvent::BatchRecalled { batch_id, reason });
        self.events.record(LedgerEvent::LifecycleAdvanced {
            batch_id,
            from,
            to: BatchState::Recalled,
        });
        Ok(())
    }

    fn update_metadata(
        &mut self,
        caller: Address,
        batch_id: BatchId,
        new_uri: String,
        new_hash: Hash,
    ) -> Result<(), RegistryError> {
        self.ensure_operator(&caller)?;
        if !self.batches.contains_key(&batch_id) {
            return Err(RegistryError::NotFound(batch_id));
        }
        invariant_non_empty_uri(&new_uri)?;
        invariant_non_zero_hash(&new_hash, "metadata hash is zero")?;
        invariant_fresh_metadata_hash(&self.used_metadata_hashes, &new_hash)?;

        self.used_metadata_hashes.insert(new_hash);
        let batch = self.batch_mut(batch_id)?;
        let old_uri = std::mem::replace(&mut batch.metadata_uri, new_uri.clone());
        let old_hash = std::mem::replace(&mut batch.metadata_hash, new_hash);

        info!(
            "[pl-01] Batch {} metadata {} -> {}",
            batch_id,
            short_hex(&old_hash),
            short_hex(&new_hash)
        );
        self.events.record(LedgerEvent::MetadataUpdated {
            batch_id,
            old_uri,
            new_uri,
            old_hash,
            new_hash,
        });
        Ok(())
    }

    fn set_operator(
        &mut self,
        caller: Address,
        new_operator: Address,
    ) -> Result<(), RegistryError> {
        self.ensure_owner(&caller)?;
        invariant_non_zero_address(&new_operator, "operator is zero")?;

        let previous = std::mem::replace(&mut self.operator, new_operator);
        info!("[pl-01] Operator set to {}", short_hex(&new_operator));
        self.events.record(LedgerEvent::OperatorChanged {
            previous,
            new: new_operator,
        });
        Ok(())
    }

    fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        self.ensure_owner(&caller)?;
        invariant_non_zero_address(&new_owner, "owner is zero")?;

        let previous = std::mem::replace(&mut self.owner, new_owner);
        info!("[pl-01] Ownership transferred to {}", short_hex(&new_owner));
        self.events.record(LedgerEvent::OwnershipTransferred {
            component: Component::BatchRegistry,
            previous,
            new: new_owner,
        });
        Ok(())
    }

    fn get_batch(&self, batch_id: BatchId) -> Result<&Batch, RegistryError> {
        self.batches
            .get(&batch_id)
            .ok_or(RegistryError::NotFound(batch_id))
    }

    fn is_terminal(&self, batch_id: BatchId) -> Result<bool, RegistryError> {
        self.get_batch(batch_id).map(Batch::is_terminal)
    }

    fn get_state(&self, batch_id: BatchId) -> Result<BatchState, RegistryError> {
        self.get_batch(batch_id).map(|b| b.state)
    }
}

impl BatchStateReader for BatchRegistry {
    fn state_of(&self, batch_id: BatchId) -> Result<BatchState, BatchLookupError> {
        debug!("[pl-01] State lookup for batch {}", batch_id);
        self.get_state(batch_id)
            .map_err(|_| BatchLookupError::NotFound(batch_id))
    }
}
