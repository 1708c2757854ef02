//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp};

/// The root currently declared for a batch.
///
/// Replaced wholesale on every submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntry {
    /// Declared root (never zero).
    pub root: Hash,
    /// Whoever submitted it.
    pub submitter: Address,
    /// Submission time.
    pub submitted_at: Timestamp,
}
