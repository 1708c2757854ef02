//! # Ports Module
//!
//! The anchor's inbound API. Its only outbound dependency is the shared
//! `BatchStateReader` port from `shared-types`.

pub mod inbound;

pub use inbound::*;
