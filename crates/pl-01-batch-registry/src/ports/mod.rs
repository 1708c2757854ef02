//! # Ports Module
//!
//! Inbound API of the Batch Registry. The registry has no outbound
//! subsystem dependencies; it only needs a clock and an event recorder.

pub mod inbound;

pub use inbound::*;
