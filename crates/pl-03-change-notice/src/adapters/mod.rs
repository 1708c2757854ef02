//! # Adapters Layer
//!
//! Binds the `RootAnchor` outbound port to the Merkle anchor subsystem.

mod merkle;
