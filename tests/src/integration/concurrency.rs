//! # Concurrency Tests
//!
//! Many threads share one `Ledger`. The sequencer serializes every mutating
//! call, so uniqueness holds under contention and the event log stays
//! gap-free. Readers running beside writers never see state whose records
//! are not yet committed.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use ledger_runtime::{Ledger, LedgerError};
    use pl_01_batch_registry::RegistryError;
    use shared_bus::LedgerEvent;
    use shared_types::hashing::content_hash;
    use shared_types::test_utils::test_hash;
    use shared_types::NoticeStatus;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    const THREADS: u8 = 8;

    fn assert_gap_free(ledger: &Ledger) {
        let sequences: Vec<u64> = ledger.events().records().iter().map(|r| r.sequence).collect();
        let expected: Vec<u64> = (1..=sequences.len() as u64).collect();
        assert_eq!(sequences, expected);
    }

    #[test]
    fn test_racing_creates_on_one_external_id() {
        let ledger = Arc::new(ledger());

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    ledger.create_batch(
                        addr(SUPPLIER),
                        test_hash(1),
                        format!("ipfs://race-{i}"),
                        test_hash(100 + i),
                    )
                })
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners, vec![&1]);
        assert!(results.iter().filter(|r| r.is_err()).all(|r| matches!(
            r,
            Err(LedgerError::Registry(RegistryError::ExternalIdUsed))
        )));
        assert_eq!(ledger.registry().batch_count(), 1);
        assert_gap_free(&ledger);
    }

    #[test]
    fn test_distinct_creates_get_distinct_ids() {
        let ledger = Arc::new(ledger());

        let handles: Vec<_> = (1..=THREADS)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || batch(&ledger, i))
            })
            .collect();
        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=u64::from(THREADS)).collect::<Vec<_>>());
        assert_gap_free(&ledger);
    }

    #[test]
    fn test_visible_batches_always_have_committed_records() {
        const CREATES: u8 = 200;
        let ledger = Arc::new(ledger());
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let ledger = Arc::clone(&ledger);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..CREATES {
                    ledger
                        .create_batch(
                            addr(SUPPLIER),
                            test_hash(i),
                            format!("ipfs://lot-{i}"),
                            content_hash(&[i]),
                        )
                        .unwrap();
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut checks = 0u32;
        loop {
            let finished = done.load(Ordering::SeqCst);
            let visible = ledger.registry().batch_count();
            let recorded = ledger
                .events()
                .records()
                .iter()
                .filter(|r| matches!(r.event, LedgerEvent::BatchCreated { .. }))
                .count();
            assert!(
                recorded >= visible,
                "{visible} batches visible but only {recorded} BatchCreated records"
            );
            checks += 1;
            if finished {
                break;
            }
        }
        writer.join().unwrap();

        assert!(checks > 0);
        assert_eq!(ledger.registry().batch_count(), usize::from(CREATES));
        assert_gap_free(&ledger);
    }

    #[test]
    fn test_verified_root_implies_committed_push() {
        let ledger = Arc::new(ledger());
        let pending: Vec<_> = (1..=THREADS * 4)
            .map(|i| {
                let b = batch(&ledger, i);
                let anchor = content_hash(&[0xA0, i]);
                let n = ledger
                    .create_notice(addr(SUPPLIER), notice(b, "Leak detected", anchor))
                    .unwrap();
                ledger.submit_notice(addr(SUPPLIER), n).unwrap();
                (b, n, anchor)
            })
            .collect();
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let ledger = Arc::clone(&ledger);
            let done = Arc::clone(&done);
            let pending = pending.clone();
            thread::spawn(move || {
                for (_, n, _) in pending {
                    ledger
                        .approve_notice(addr(REGULATOR), n, "confirmed".into())
                        .unwrap();
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        loop {
            let finished = done.load(Ordering::SeqCst);
            for &(b, n, anchor) in &pending {
                let approved = ledger.notice(n).unwrap().status == NoticeStatus::Approved;
                if !ledger.verify_root(b, &anchor) && !approved {
                    continue;
                }
                let records = ledger.events().records_for_notice(n);
                assert!(
                    records
                        .iter()
                        .any(|r| matches!(r.event, LedgerEvent::AnchorPushed { .. })),
                    "notice {n} visible as approved or anchored before its push record"
                );
            }
            if finished {
                break;
            }
        }
        writer.join().unwrap();

        for (b, n, anchor) in pending {
            assert!(ledger.verify_root(b, &anchor));
            assert!(ledger.anchor_verified_on_merkle(n).unwrap());
        }
        assert_gap_free(&ledger);
    }

    #[test]
    fn test_open_view_holds_back_writers() {
        let ledger = Arc::new(ledger());
        let view = ledger.registry();

        let writer = {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || batch(&ledger, 1))
        };
        thread::sleep(Duration::from_millis(50));

        assert_eq!(view.batch_count(), 0);
        assert!(!ledger.events().records().iter().any(|r| matches!(
            r.event,
            LedgerEvent::BatchCreated { .. }
        )));
        drop(view);

        assert_eq!(writer.join().unwrap(), 1);
        assert_eq!(ledger.registry().batch_count(), 1);
        assert_eq!(ledger.events().records_for_batch(1).len(), 1);
    }

    #[test]
    fn test_concurrent_approvals_of_one_notice() {
        let ledger = Arc::new(ledger());
        let b = batch(&ledger, 1);
        let n = ledger
            .create_notice(addr(SUPPLIER), notice(b, "Leak detected", test_hash(0xAB)))
            .unwrap();
        ledger.submit_notice(addr(SUPPLIER), n).unwrap();

        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        ledger.approve_notice(addr(REGULATOR), n, format!("approve {i}"))
                    } else {
                        ledger.reject_notice(addr(REGULATOR), n, format!("reject {i}"))
                    }
                })
            })
            .collect();
        let decided = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(decided, 1);
        assert!(ledger.notice(n).unwrap().status.is_decided());
        assert_gap_free(&ledger);
    }
}
