//! # Adapters Layer
//!
//! Lock-guarded handle that lets other subsystems read batch state while the
//! registry stays mutable behind the sequencer.

mod shared;

pub use shared::SharedRegistry;
