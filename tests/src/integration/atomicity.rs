//! # Atomicity Tests
//!
//! A rejected call leaves no trace: no state change in any subsystem and no
//! record in the event log. An accepted call commits all of its records
//! together with consecutive sequence numbers.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ledger_runtime::{Ledger, LedgerConfig, LedgerError};
    use pl_03_change_notice::NoticeError;
    use shared_bus::LedgerEvent;
    use shared_types::test_utils::{test_hash, FixedTimeSource, TEST_EPOCH};
    use shared_types::{BatchState, NoticeStatus, ZERO_HASH};
    use std::sync::Arc;

    fn event_names(ledger: &Ledger, since: usize) -> Vec<String> {
        ledger
            .events()
            .records_since(since as u64)
            .into_iter()
            .map(|r| format!("{:?}", r.event.topic()))
            .collect()
    }

    #[test]
    fn test_bootstrap_commits_regulator_and_anchor_together() {
        let ledger = ledger();
        let records = ledger.events().records();

        assert_eq!(records.len(), 3);
        assert!(matches!(records[0].event, LedgerEvent::RegulatorChanged { .. }));
        assert_eq!(
            records[1].event,
            LedgerEvent::MerkleAnchorSet { configured: true }
        );
        assert!(matches!(records[2].event, LedgerEvent::SupplierSet { enabled: true, .. }));
        assert_eq!(
            records.iter().map(|r| r.sequence).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_bootstrap_without_regulator_or_anchor_records_nothing() {
        let config = LedgerConfig {
            regulator: shared_types::ZERO_ADDRESS,
            anchor_on_approval: false,
            ..config()
        };
        let ledger =
            Ledger::with_clock(config, Arc::new(FixedTimeSource::new(TEST_EPOCH))).unwrap();

        assert!(ledger.events().is_empty());
        assert_eq!(ledger.regulator(), shared_types::ZERO_ADDRESS);
    }

    #[test]
    fn test_rejected_calls_leave_no_records() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        let before = ledger.events().len();

        assert!(ledger.advance_lifecycle(addr(STRANGER), b, BatchState::InTransit).is_err());
        assert!(ledger.advance_lifecycle(addr(OPERATOR), b, BatchState::Sold).is_err());
        assert!(ledger.recall(addr(OPERATOR), 99, "none".into()).is_err());
        assert!(ledger
            .create_batch(addr(SUPPLIER), ZERO_HASH, "ipfs://x".into(), test_hash(7))
            .is_err());
        assert!(ledger.set_operator(addr(STRANGER), addr(STRANGER)).is_err());
        assert!(ledger.submit_root(addr(STRANGER), b, ZERO_HASH).is_err());
        assert!(ledger
            .create_notice(addr(STRANGER), notice(b, "x", ZERO_HASH))
            .is_err());
        assert!(ledger
            .create_notice(addr(SUPPLIER), notice(b, "", ZERO_HASH))
            .is_err());
        assert!(ledger.approve_notice(addr(REGULATOR), n, "early".into()).is_err());
        assert!(ledger.submit_notice(addr(STRANGER), n).is_err());
        assert!(ledger.set_regulator(addr(STRANGER), addr(STRANGER)).is_err());
        assert!(ledger.set_merkle_anchor(addr(STRANGER), false).is_err());

        assert_eq!(ledger.events().len(), before, "{:?}", event_names(&ledger, before));
        assert_eq!(ledger.batch_state(b).unwrap(), BatchState::Registered);
        assert_eq!(ledger.notice(n).unwrap().status, NoticeStatus::Draft);
        assert_eq!(ledger.root(b), ZERO_HASH);
        assert_eq!(ledger.notices_for_batch(b), vec![n]);
    }

    #[test]
    fn test_failed_create_consumes_no_id() {
        let ledger = ledger();
        batch(&ledger, 1);
        assert!(ledger
            .create_batch(addr(SUPPLIER), test_hash(1), "ipfs://dup".into(), test_hash(150))
            .is_err());

        let second = batch(&ledger, 2);

        assert_eq!(second, 2);
        assert!(!ledger.registry().is_metadata_hash_used(&test_hash(150)));
    }

    #[test]
    fn test_recall_commits_two_consecutive_records() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let before = ledger.events().len() as u64;

        ledger
            .recall(addr(OPERATOR), b, "contamination".into())
            .unwrap();

        let unit = ledger.events().records_since(before);
        assert_eq!(unit.len(), 2);
        assert_eq!(unit[0].sequence, before + 1);
        assert_eq!(unit[1].sequence, before + 2);
        assert_eq!(
            unit[0].event,
            LedgerEvent::BatchRecalled {
                batch_id: b,
                reason: "contamination".into(),
            }
        );
        assert_eq!(
            unit[1].event,
            LedgerEvent::LifecycleAdvanced {
                batch_id: b,
                from: BatchState::Registered,
                to: BatchState::Recalled,
            }
        );
    }

    #[test]
    fn test_failed_approval_leaves_notice_and_store_untouched() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        let before = ledger.events().len();

        let err = ledger
            .approve_notice(addr(OPERATOR), n, "not mine".into())
            .unwrap_err();

        assert!(matches!(err, LedgerError::Notice(NoticeError::NotRegulator)));
        assert_eq!(ledger.events().len(), before);
        assert_eq!(ledger.notice(n).unwrap().status, NoticeStatus::Submitted);
        assert_eq!(ledger.notice(n).unwrap().regulator_note, "");
        assert_eq!(ledger.root(b), ZERO_HASH);
    }

    #[test]
    fn test_notice_records_stay_attached_to_their_batch() {
        let ledger = ledger();
        let a = batch(&ledger, 1);
        let b = batch(&ledger, 2);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "confirmed".into())
            .unwrap();

        let for_a = ledger.events().records_for_batch(a);
        let for_b = ledger.events().records_for_batch(b);
        let for_n = ledger.events().records_for_notice(n);

        assert_eq!(for_a.len(), 1);
        // created, submitted, root, approved, pushed
        assert_eq!(for_b.len(), 5);
        assert_eq!(for_n.len(), 4);
    }
}
