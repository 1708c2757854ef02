//! # PL-03 Change Notice
//!
//! Role-gated workflow for regulator-reviewed change notices against batches.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Roles
//!
//! | Role | Holder | Can |
//! |------|--------|-----|
//! | owner | deployer | set regulator, supplier/retailer flags, anchor |
//! | regulator | single identity | approve, reject |
//! | supplier | capability flag | create, submit own notices |
//! | retailer | capability flag | nothing yet (reserved) |
//!
//! ## Notice Status
//!
//! ```text
//! Draft ──submit──→ Submitted ──approve──→ Approved
//!                       └──────reject───→ Rejected
//!
//! Superseded, Closed: declared, unreachable
//! ```
//!
//! ## Anchor Push
//!
//! On approval, a notice carrying a non-zero anchor is pushed to the
//! configured `RootAnchor` keyed by its batch. The push runs before any
//! local mutation; if it fails, the approval fails with no effect.
//!
//! ## Module Structure
//!
//! ```text
//! pl-03-change-notice/
//! ├── domain/          # Notice, NoticeError, invariants
//! ├── ports/           # ChangeNoticeApi (inbound), RootAnchor (outbound)
//! ├── service/         # ChangeNotice<R, A>
//! └── adapters/        # RootAnchor for SharedAnchor
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{NewNotice, Notice, NoticeError};
pub use ports::{ChangeNoticeApi, RootAnchor};
pub use service::{ChangeNotice, NoticeDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
