//! # Core Domain Entities
//!
//! Identifiers and enumerations shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`, `BatchId`, `NoticeId`
//! - **Batch Lifecycle**: `BatchState`
//! - **Notice Workflow**: `NoticeStatus`, `NoticeType`, `Severity`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte value (content hash, external id, integrity root).
pub type Hash = [u8; 32];

/// A 20-byte account identity.
pub type Address = [u8; 20];

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// Sequential batch identifier. Allocation starts at 1.
pub type BatchId = u64;

/// Sequential notice identifier. Allocation starts at 1.
pub type NoticeId = u64;

/// The all-zero hash. Never a valid key or root.
pub const ZERO_HASH: Hash = [0u8; 32];

/// The all-zero address. Never a valid identity.
pub const ZERO_ADDRESS: Address = [0u8; 20];

/// Returns true if every byte of the hash is zero.
#[inline]
pub fn is_zero_hash(hash: &Hash) -> bool {
    hash.iter().all(|b| *b == 0)
}

/// Returns true if every byte of the address is zero.
#[inline]
pub fn is_zero_address(address: &Address) -> bool {
    address.iter().all(|b| *b == 0)
}

/// Abbreviated hex rendering for log lines (`ab12cd34..`).
pub fn short_hex(bytes: &[u8]) -> String {
    let prefix = &bytes[..bytes.len().min(4)];
    format!("{}..", hex::encode(prefix))
}

// =============================================================================
// CLUSTER B: BATCH LIFECYCLE
// =============================================================================

/// Lifecycle state of a batch.
///
/// The discriminant is the stable state code handed across the
/// `BatchStateReader` boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BatchState {
    /// Created, not yet moved.
    #[default]
    Registered = 0,
    /// On its way between sites.
    InTransit = 1,
    /// Held in a warehouse.
    InStorage = 2,
    /// Offered to buyers.
    ForSale = 3,
    /// Sold (terminal).
    Sold = 4,
    /// Recalled by the operator (terminal).
    Recalled = 5,
    /// Expired (terminal).
    Expired = 6,
}

impl BatchState {
    /// All states in code order.
    pub const ALL: [BatchState; 7] = [
        Self::Registered,
        Self::InTransit,
        Self::InStorage,
        Self::ForSale,
        Self::Sold,
        Self::Recalled,
        Self::Expired,
    ];

    /// Stable numeric code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a state code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sold | Self::Recalled | Self::Expired)
    }

    /// Check if a lifecycle advance is allowed.
    ///
    /// Recall is not part of this table; it is a separate forced transition.
    pub fn can_transition_to(&self, next: BatchState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (_, Self::Expired) => true,
            (Self::Registered, Self::InTransit) => true,
            (Self::Registered, Self::InStorage) => true,
            (Self::InTransit, Self::InStorage) => true,
            (Self::InStorage, Self::ForSale) => true,
            (Self::ForSale, Self::Sold) => true,
            _ => false,
        }
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// CLUSTER C: NOTICE WORKFLOW
// =============================================================================

/// Status of a change notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeStatus {
    /// Being prepared by its creator.
    #[default]
    Draft,
    /// Awaiting the regulator.
    Submitted,
    /// Accepted by the regulator.
    Approved,
    /// Refused by the regulator.
    Rejected,
    /// Reserved: replaced by a later notice.
    Superseded,
    /// Reserved: no longer in effect.
    Closed,
}

impl NoticeStatus {
    /// Check if transition is valid.
    ///
    /// `Superseded` and `Closed` are declared but not reachable.
    pub fn can_transition_to(&self, next: NoticeStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::Rejected)
        )
    }

    /// Check if the regulator has ruled on the notice.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Kind of change a notice announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeType {
    /// Consumer safety concern.
    Safety,
    /// Quality deviation.
    Quality,
    /// Label or packaging correction.
    Labeling,
    /// Ingredient or formulation change.
    Composition,
    /// Handling, storage or transport change.
    Logistics,
    /// Anything else.
    Other,
}

/// Severity tag attached to a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational.
    Low,
    /// Needs attention.
    Medium,
    /// Needs prompt action.
    High,
    /// Needs immediate action.
    Critical,
}
