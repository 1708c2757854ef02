//! # Ports Module
//!
//! - `inbound`: what the change-notice workflow offers
//! - `outbound`: the root store it pushes approved anchors into
//!
//! The registry dependency is the shared `BatchStateReader` port.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
