//! # Shared Types Crate
//!
//! This crate contains the identifiers, lifecycle enums and ports that cross
//! subsystem boundaries in the provenance ledger.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Narrow Coupling**: The only registry internal visible to the other
//!   subsystems is `BatchStateReader::state_of`.
//! - **Zero Means Absent**: The all-zero `Hash` / `Address` is never a valid
//!   identity, key or root.

pub mod entities;
pub mod errors;
pub mod hashing;
pub mod ports;
pub mod test_utils;

pub use entities::*;
pub use errors::*;
pub use ports::*;
