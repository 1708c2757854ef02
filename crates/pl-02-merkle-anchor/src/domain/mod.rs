//! # Domain Layer
//!
//! Root entries and anchor errors.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
