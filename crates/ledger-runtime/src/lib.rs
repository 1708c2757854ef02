//! # Provenance Ledger Runtime
//!
//! Wires the three subsystems behind a single sequencer.
//!
//! ## Dependency Order
//!
//! ```text
//! BatchRegistry(1) ←── MerkleAnchor(2) ←── ChangeNotice(3)
//!        ↑                                      │
//!        └──────────── state_of ────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `ledger` - the `Ledger` sequencer and its typed operations
//! - `config` - `LedgerConfig`, loaded from `PL_*` environment variables
//! - `commands` - serde form of every mutating operation, for replay scripts
//! - `telemetry` - tracing subscriber setup
//! - `hex_codec` - fixed-width hex for addresses and hashes
//! - `views` - read-only store views and the audit-log query surface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod config;
pub mod hex_codec;
pub mod ledger;
pub mod telemetry;
pub mod views;

pub use commands::{CommandOutcome, LedgerCommand};
pub use config::{ConfigError, LedgerConfig};
pub use ledger::{Ledger, LedgerAnchor, LedgerError, LedgerNotices};
pub use views::{AuditLog, StoreView};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
