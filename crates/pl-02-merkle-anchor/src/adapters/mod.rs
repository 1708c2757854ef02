//! # Adapters Layer
//!
//! Lock-guarded handle shared between the runtime and the notice workflow.

mod shared;

pub use shared::SharedAnchor;
