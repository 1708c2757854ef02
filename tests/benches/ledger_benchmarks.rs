//! # Provenance Ledger Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Hashing | Merkle root over N leaves | linear in N |
//! | Hashing | Inclusion proof verify | < 10µs |
//! | Registry | `create_batch` through the sequencer | < 50µs |
//! | Notices | create → submit → approve with anchor push | < 100µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ledger_runtime::{Ledger, LedgerConfig};
use pl_03_change_notice::NewNotice;
use shared_types::hashing::{content_hash, merkle_proof, merkle_root, verify_merkle_proof};
use shared_types::test_utils::test_address;
use shared_types::{Hash, NoticeType, Severity};
use std::time::Duration;

fn leaves(n: u64) -> Vec<Hash> {
    (0..n).map(|i| content_hash(&i.to_le_bytes())).collect()
}

fn ledger() -> Ledger {
    let config = LedgerConfig {
        owner: test_address(1),
        operator: test_address(2),
        regulator: test_address(3),
        ..LedgerConfig::default()
    };
    let ledger = Ledger::new(config).expect("bench ledger");
    ledger
        .set_supplier(test_address(1), test_address(4), true)
        .expect("grant supplier");
    ledger
}

// ============================================================================
// HASHING
// ============================================================================

fn bench_merkle(c: &mut Criterion) {
    let mut group = c.benchmark_group("hashing");

    for size in [16u64, 256, 4096] {
        let data = leaves(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("merkle_root", size), &data, |b, data| {
            b.iter(|| black_box(merkle_root(data)))
        });
    }

    let data = leaves(1024);
    let root = merkle_root(&data);
    let proof = merkle_proof(&data, 517).expect("index in range");
    group.bench_function("verify_proof_1024", |b| {
        b.iter(|| black_box(verify_merkle_proof(&proof, &root)))
    });

    group.finish();
}

// ============================================================================
// REGISTRY
// ============================================================================

fn bench_create_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.measurement_time(Duration::from_secs(5));

    let ledger = ledger();
    let supplier = test_address(4);
    let mut counter = 0u64;
    group.bench_function("create_batch", |b| {
        b.iter(|| {
            counter += 1;
            let external_id = content_hash(&counter.to_le_bytes());
            let metadata_hash = content_hash(&external_id);
            black_box(
                ledger
                    .create_batch(supplier, external_id, "ipfs://bench".into(), metadata_hash)
                    .is_ok(),
            )
        })
    });

    group.finish();
}

// ============================================================================
// NOTICES
// ============================================================================

fn bench_notice_approval(c: &mut Criterion) {
    let mut group = c.benchmark_group("notices");

    let ledger = ledger();
    let supplier = test_address(4);
    let regulator = test_address(3);
    let batch_id = ledger
        .create_batch(
            supplier,
            content_hash(b"bench-lot"),
            "ipfs://bench-lot".into(),
            content_hash(b"bench-meta"),
        )
        .expect("bench batch");
    let mut counter = 0u64;

    group.bench_function("create_submit_approve", |b| {
        b.iter(|| {
            counter += 1;
            let notice_id = ledger
                .create_notice(
                    supplier,
                    NewNotice {
                        batch_id,
                        notice_type: NoticeType::Quality,
                        severity: Severity::Medium,
                        effective_from: 0,
                        summary: "bench".into(),
                        details_uri: String::new(),
                        anchor: content_hash(&counter.to_le_bytes()),
                    },
                )
                .expect("create");
            ledger.submit_notice(supplier, notice_id).expect("submit");
            ledger
                .approve_notice(regulator, notice_id, "ok".into())
                .expect("approve");
            black_box(ledger.anchor_verified_on_merkle(notice_id))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_merkle,
    bench_create_batch,
    bench_notice_approval
);
criterion_main!(benches);
