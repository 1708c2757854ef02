//! # Integration Tests
//!
//! Every test builds a full `Ledger` (registry, anchor store, notice
//! workflow and event log) and drives it through its public operations.

pub mod atomicity;
pub mod concurrency;
pub mod flows;

#[cfg(test)]
pub(crate) mod fixtures {
    use ledger_runtime::{Ledger, LedgerConfig};
    use pl_03_change_notice::NewNotice;
    use shared_types::test_utils::{test_address, test_hash, FixedTimeSource, TEST_EPOCH};
    use shared_types::{Address, BatchId, Hash, NoticeType, Severity};
    use std::sync::Arc;

    pub const OWNER: u8 = 1;
    pub const OPERATOR: u8 = 2;
    pub const REGULATOR: u8 = 3;
    pub const SUPPLIER: u8 = 4;
    pub const STRANGER: u8 = 9;

    pub fn addr(n: u8) -> Address {
        test_address(n)
    }

    pub fn config() -> LedgerConfig {
        LedgerConfig {
            owner: addr(OWNER),
            operator: addr(OPERATOR),
            regulator: addr(REGULATOR),
            ..LedgerConfig::default()
        }
    }

    /// Ledger with a regulator, one supplier and the anchor store attached.
    pub fn ledger() -> Ledger {
        let ledger = Ledger::with_clock(config(), Arc::new(FixedTimeSource::new(TEST_EPOCH)))
            .unwrap();
        ledger
            .set_supplier(addr(OWNER), addr(SUPPLIER), true)
            .unwrap();
        ledger
    }

    /// Register batch `n` with external id `n` and metadata hash `100 + n`.
    pub fn batch(ledger: &Ledger, n: u8) -> BatchId {
        ledger
            .create_batch(
                addr(SUPPLIER),
                test_hash(n),
                format!("ipfs://lot-{n}"),
                test_hash(100 + n),
            )
            .unwrap()
    }

    pub fn notice(batch_id: BatchId, summary: &str, anchor: Hash) -> NewNotice {
        NewNotice {
            batch_id,
            notice_type: NoticeType::Safety,
            severity: Severity::High,
            effective_from: TEST_EPOCH,
            summary: summary.to_string(),
            details_uri: "ipfs://details".to_string(),
            anchor,
        }
    }
}
