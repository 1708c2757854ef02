//! # PL-02 Merkle Anchor
//!
//! One declared integrity root per batch, open to any submitter.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Accept a non-zero root for any batch the registry knows about
//! - Overwrite the previous root on each submission (no history)
//! - Answer equality checks against the stored root
//!
//! Submission carries no authorization check. A root on file shows that
//! some value was declared; provenance comes from comparing it with a
//! specific notice's anchor.
//!
//! ## Module Structure
//!
//! ```text
//! pl-02-merkle-anchor/
//! ├── domain/          # RootEntry, AnchorError
//! ├── ports/           # MerkleAnchorApi
//! ├── service/         # MerkleAnchor<R: BatchStateReader>
//! └── adapters/        # SharedAnchor (lock-guarded handle)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::SharedAnchor;
pub use domain::{AnchorError, RootEntry};
pub use ports::MerkleAnchorApi;
pub use service::{AnchorDependencies, MerkleAnchor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
