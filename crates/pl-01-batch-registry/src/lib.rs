//! # PL-01 Batch Registry
//!
//! Canonical identity and lifecycle state of every production batch.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Register batches with globally unique external ids and metadata hashes
//! - Enforce the lifecycle table (operator only)
//! - Recall any non-terminal batch (operator only)
//! - Serve `BatchStateReader::state_of` to the anchor and notice subsystems
//!
//! ## Lifecycle
//!
//! ```text
//! Registered ──→ InTransit ──→ InStorage ──→ ForSale ──→ Sold
//!     └──────────────────────────↑
//!
//! any non-terminal ──→ Expired          (advance)
//! any non-terminal ──→ Recalled         (recall)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! pl-01-batch-registry/
//! ├── domain/          # Batch, RegistryError, invariants
//! ├── ports/           # BatchRegistryApi
//! ├── service/         # BatchRegistry
//! └── adapters/        # SharedRegistry (lock-guarded handle)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::SharedRegistry;
pub use domain::{Batch, RegistryError};
pub use ports::BatchRegistryApi;
pub use service::{BatchRegistry, RegistryDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
