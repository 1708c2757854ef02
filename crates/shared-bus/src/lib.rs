//! # Shared Bus - Append-Only Ledger Event Log
//!
//! Every accepted state change in the registry, anchor and notice subsystems
//! emits exactly one record per fact into a single, totally ordered log that
//! external indexers and auditors read.
//!
//! ## Units of Work
//!
//! ```text
//! ┌──────────────┐   record()   ┌──────────────┐  commit()  ┌──────────────┐
//! │  Subsystem   │ ───────────→ │   Staged     │ ─────────→ │   Durable    │
//! │  operation   │              │   events     │            │   records    │
//! └──────────────┘              └──────────────┘            └──────┬───────┘
//!                                      │ drop                      │ broadcast
//!                                      ▼                           ▼
//!                                  discarded                 Subscriptions
//! ```
//!
//! ## Guarantees
//!
//! - **Gap-free sequence:** sequence numbers are assigned at commit time
//! - **All-or-nothing:** a failed operation's staged events never become durable
//! - **Queryable by entity:** records can be filtered by batch or notice id

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{Component, EventFilter, EventTopic, LedgerEvent, LedgerRecord};
pub use publisher::{BusError, EventLog, EventRecorder, UnitOfWork};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
