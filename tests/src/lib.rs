//! # Provenance-Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Cross-subsystem flows through the Ledger
//! │   ├── flows.rs       # Batch → notice → anchor scenarios
//! │   ├── atomicity.rs   # Zero-effect failures, event units
//! │   ├── concurrency.rs # Uniqueness and ordering under threads
//! │   └── replay.rs      # JSON command scripts
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pl-tests
//! cargo test -p pl-tests integration::flows
//! cargo bench -p pl-tests
//! ```

pub mod integration;
