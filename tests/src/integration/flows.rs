//! # Integration Test Flows
//!
//! End-to-end scenarios across the registry, the notice workflow and the
//! anchor store:
//!
//! 1. **Registry**: uniqueness of external ids and metadata hashes
//! 2. **Notice → Anchor**: approval pushes the notice's anchor
//! 3. **Decisions are final**: reject after approve fails
//! 4. **Lifecycle**: no skipping ahead, terminal states stick

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ledger_runtime::LedgerError;
    use pl_01_batch_registry::RegistryError;
    use pl_02_merkle_anchor::AnchorError;
    use pl_03_change_notice::NoticeError;
    use shared_bus::LedgerEvent;
    use shared_types::test_utils::test_hash;
    use shared_types::{BatchState, ErrorKind, NoticeStatus, ZERO_HASH};

    // =========================================================================
    // REGISTRY
    // =========================================================================

    #[test]
    fn test_duplicate_external_id_creates_nothing() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        assert_eq!(ledger.batch_state(b).unwrap(), BatchState::Registered);

        let result = ledger.create_batch(
            addr(SUPPLIER),
            test_hash(1),
            "ipfs://dup".into(),
            test_hash(200),
        );

        assert!(matches!(
            result,
            Err(LedgerError::Registry(RegistryError::ExternalIdUsed))
        ));
        assert_eq!(result.unwrap_err().kind(), Some(ErrorKind::UniquenessViolation));
        assert!(ledger.batch(2).is_err());
        assert!(!ledger.registry().is_metadata_hash_used(&test_hash(200)));
    }

    #[test]
    fn test_metadata_hashes_stay_unique_across_updates() {
        let ledger = ledger();
        let a = batch(&ledger, 1);
        let b = batch(&ledger, 2);

        ledger
            .update_metadata(addr(OPERATOR), a, "ipfs://a2".into(), test_hash(50))
            .unwrap();

        for (target, hash) in [(b, test_hash(101)), (b, test_hash(50)), (a, test_hash(101))] {
            assert!(matches!(
                ledger.update_metadata(addr(OPERATOR), target, "ipfs://x".into(), hash),
                Err(LedgerError::Registry(RegistryError::MetadataHashUsed))
            ));
        }
        assert!(matches!(
            ledger.create_batch(addr(SUPPLIER), test_hash(3), "ipfs://c".into(), test_hash(50)),
            Err(LedgerError::Registry(RegistryError::MetadataHashUsed))
        ));
    }

    #[test]
    fn test_registered_to_sold_rejected_then_walk_the_table() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let op = addr(OPERATOR);

        assert!(matches!(
            ledger.advance_lifecycle(op, b, BatchState::Sold),
            Err(LedgerError::Registry(RegistryError::InvalidTransition { .. }))
        ));

        for state in [
            BatchState::InTransit,
            BatchState::InStorage,
            BatchState::ForSale,
            BatchState::Sold,
        ] {
            ledger.advance_lifecycle(op, b, state).unwrap();
        }
        assert!(ledger.is_terminal(b).unwrap());
        assert!(ledger.recall(op, b, "too late".into()).is_err());
        assert_eq!(ledger.batch_state(b).unwrap(), BatchState::Sold);
    }

    // =========================================================================
    // NOTICE → ANCHOR
    // =========================================================================

    #[test]
    fn test_supplier_notice_approved_and_anchored() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let anchor = test_hash(0xAB);

        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", anchor))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        assert_eq!(ledger.notice(n).unwrap().status, NoticeStatus::Submitted);

        let denied = ledger.approve_notice(addr(STRANGER), n, "confirmed".into());
        assert!(matches!(
            denied,
            Err(LedgerError::Notice(NoticeError::NotRegulator))
        ));
        assert_eq!(ledger.notice(n).unwrap().status, NoticeStatus::Submitted);
        assert!(!ledger.verify_root(b, &anchor));

        ledger
            .approve_notice(addr(REGULATOR), n, "confirmed".into())
            .unwrap();

        let approved = ledger.notice(n).unwrap();
        assert_eq!(approved.status, NoticeStatus::Approved);
        assert_eq!(approved.regulator_note, "confirmed");
        assert!(ledger.verify_root(b, &anchor));
        assert_eq!(ledger.root(b), anchor);
        assert!(ledger.anchor_verified_on_merkle(n).unwrap());
    }

    #[test]
    fn test_approval_records_root_and_push_in_one_unit() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        let before = ledger.events().len() as u64;

        ledger
            .approve_notice(addr(REGULATOR), n, "confirmed".into())
            .unwrap();

        let unit: Vec<LedgerEvent> = ledger
            .events()
            .records_since(before)
            .into_iter()
            .map(|r| r.event)
            .collect();
        assert_eq!(unit.len(), 3);
        assert_eq!(
            unit[0],
            LedgerEvent::RootSubmitted {
                batch_id: b,
                root: test_hash(0xAB),
                submitter: addr(REGULATOR),
            }
        );
        assert!(matches!(unit[1], LedgerEvent::NoticeApproved { .. }));
        assert!(matches!(unit[2], LedgerEvent::AnchorPushed { .. }));
    }

    #[test]
    fn test_zero_anchor_never_touches_root_store() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        ledger
            .submit_root(addr(STRANGER), b, test_hash(0x77))
            .unwrap();

        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Label fix", ZERO_HASH))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "ok".into())
            .unwrap();

        assert_eq!(ledger.root(b), test_hash(0x77));
        assert!(!ledger.anchor_verified_on_merkle(n).unwrap());
    }

    #[test]
    fn test_detached_anchor_store_means_unverified() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger
            .submit_root(addr(STRANGER), b, test_hash(0xAB))
            .unwrap();
        assert!(ledger.anchor_verified_on_merkle(n).unwrap());

        ledger.set_merkle_anchor(addr(OWNER), false).unwrap();

        assert!(!ledger.anchor_verified_on_merkle(n).unwrap());
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "ok".into())
            .unwrap();
        assert!(ledger.verify_root(b, &test_hash(0xAB)));
    }

    #[test]
    fn test_open_submission_can_overwrite_an_approved_anchor() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "confirmed".into())
            .unwrap();

        ledger
            .submit_root(addr(STRANGER), b, test_hash(0xCD))
            .unwrap();

        assert!(!ledger.anchor_verified_on_merkle(n).unwrap());
        assert_eq!(ledger.notice(n).unwrap().status, NoticeStatus::Approved);
    }

    #[test]
    fn test_root_for_unknown_batch_rejected() {
        let ledger = ledger();
        assert!(matches!(
            ledger.submit_root(addr(STRANGER), 5, test_hash(1)),
            Err(LedgerError::Anchor(AnchorError::Registry(_)))
        ));
        assert!(matches!(
            ledger.submit_root(addr(STRANGER), 5, ZERO_HASH),
            Err(LedgerError::Anchor(AnchorError::ZeroRoot))
        ));
    }

    // =========================================================================
    // DECISIONS
    // =========================================================================

    #[test]
    fn test_reject_after_approve_is_invalid_state() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "confirmed".into())
            .unwrap();

        let err = ledger
            .reject_notice(addr(REGULATOR), n, "insufficient evidence".into())
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::InvalidState));
        let stored = ledger.notice(n).unwrap();
        assert_eq!(stored.status, NoticeStatus::Approved);
        assert_eq!(stored.regulator_note, "confirmed");
    }

    #[test]
    fn test_notice_on_missing_batch() {
        let ledger = ledger();
        let err = ledger
            .create_notice(addr(SUPPLIER), notice(42, "Ghost", ZERO_HASH))
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
        assert!(ledger.notices_for_batch(42).is_empty());
        assert!(ledger.notice(1).is_err());
    }

    #[test]
    fn test_notices_listed_per_batch_in_order() {
        let ledger = ledger();
        let a = batch(&ledger, 1);
        let b = batch(&ledger, 2);

        let n1 = ledger
            .create_notice(addr(SUPPLIER), notice(a, "first", ZERO_HASH))
            .unwrap();
        let n2 = ledger
            .create_notice(addr(SUPPLIER), notice(b, "other batch", ZERO_HASH))
            .unwrap();
        let n3 = ledger
            .create_notice(addr(SUPPLIER), notice(a, "second", ZERO_HASH))
            .unwrap();

        assert_eq!(ledger.notices_for_batch(a), vec![n1, n3]);
        assert_eq!(ledger.notices_for_batch(b), vec![n2]);
    }

    #[test]
    fn test_notices_survive_terminal_batches() {
        let ledger = ledger();
        let b = batch(&ledger, 1);
        ledger
            .recall(addr(OPERATOR), b, "contamination".into())
            .unwrap();

        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Recall notice", test_hash(0xEE)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();
        ledger
            .approve_notice(addr(REGULATOR), n, "recall confirmed".into())
            .unwrap();

        assert!(ledger.verify_root(b, &test_hash(0xEE)));
    }
}
