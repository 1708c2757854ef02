//! # Domain Invariants
//!
//! Business rules for the Batch Registry.

use super::errors::RegistryError;
use shared_types::{is_zero_address, is_zero_hash, Address, BatchId, BatchState, Hash};
use std::collections::HashSet;

/// Invariant: required 32-byte values are never zero.
pub fn invariant_non_zero_hash(value: &Hash, field: &'static str) -> Result<(), RegistryError> {
    if is_zero_hash(value) {
        return Err(RegistryError::BadInput(field));
    }
    Ok(())
}

/// Invariant: identities handed to role setters are never zero.
pub fn invariant_non_zero_address(
    value: &Address,
    field: &'static str,
) -> Result<(), RegistryError> {
    if is_zero_address(value) {
        return Err(RegistryError::BadInput(field));
    }
    Ok(())
}

/// Invariant: metadata URIs are never empty.
pub fn invariant_non_empty_uri(uri: &str) -> Result<(), RegistryError> {
    if uri.is_empty() {
        return Err(RegistryError::BadInput("metadata URI is empty"));
    }
    Ok(())
}

/// Invariant: a metadata hash is used at most once, ever.
///
/// The used set is never cleared, so a batch cannot reuse its own prior hash.
pub fn invariant_fresh_metadata_hash(
    used: &HashSet<Hash>,
    hash: &Hash,
) -> Result<(), RegistryError> {
    if used.contains(hash) {
        return Err(RegistryError::MetadataHashUsed);
    }
    Ok(())
}

/// Invariant: an external id is used at most once, ever.
pub fn invariant_fresh_external_id(
    used: &HashSet<Hash>,
    external_id: &Hash,
) -> Result<(), RegistryError> {
    if used.contains(external_id) {
        return Err(RegistryError::ExternalIdUsed);
    }
    Ok(())
}

/// Invariant: lifecycle moves follow the table; terminal batches never move.
pub fn invariant_transition_allowed(
    batch_id: BatchId,
    from: BatchState,
    to: BatchState,
) -> Result<(), RegistryError> {
    if from.is_terminal() {
        return Err(RegistryError::AlreadyTerminal {
            batch_id,
            state: from,
        });
    }
    if !from.can_transition_to(to) {
        return Err(RegistryError::InvalidTransition { from, to });
    }
    Ok(())
}
