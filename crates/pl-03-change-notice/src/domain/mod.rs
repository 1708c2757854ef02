//! # Domain Layer
//!
//! Notices, their errors and the workflow rules.

pub mod entities;
pub mod errors;
pub mod invariants;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
