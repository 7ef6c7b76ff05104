//! # Transaction Group Benchmarks
//!
//! Every operation is linear in total input size:
//!
//! | Operation | Work per transaction |
//! |-----------|----------------------|
//! | transaction digest | 1 decode, 1 encode, 1 hash |
//! | assign group | 1 decode, 2 encodes, 1 hash |
//! | verify group | 1 decode, 1 encode, 1 hash |
//! | segmentation | verify cost plus 1 compose per closed run |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_transaction_groups::{
    EncodedTransaction, FieldValue, MsgpackCodec, TransactionCodec, TransactionGroupApi,
    TransactionGroupService, TransactionRecord,
};
use rand::Rng;
use std::time::Duration;

/// Random payment with a note of `note_len` bytes.
fn random_payment(rng: &mut impl Rng, note_len: usize) -> EncodedTransaction {
    let mut note = vec![0u8; note_len];
    rng.fill(note.as_mut_slice());
    let record = TransactionRecord::new()
        .with_field("amt", FieldValue::uint(rng.gen_range(1..1_000_000_000)))
        .with_field("fee", FieldValue::uint(1000))
        .with_field("fv", FieldValue::uint(rng.gen()))
        .with_field("note", FieldValue::bytes(&note))
        .with_field("rcv", FieldValue::bytes(&rng.gen::<[u8; 32]>()))
        .with_field("snd", FieldValue::bytes(&rng.gen::<[u8; 32]>()))
        .with_field("type", FieldValue::string("pay"));
    EncodedTransaction::new(MsgpackCodec::new().encode(&record))
}

fn random_batch(len: usize) -> Vec<EncodedTransaction> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| random_payment(&mut rng, 64)).collect()
}

// ============================================================================
// Digests
// ============================================================================

fn bench_transaction_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-transaction-digest");
    let service = TransactionGroupService::new();
    let mut rng = rand::thread_rng();

    for note_len in [0usize, 256, 1024] {
        let tx = random_payment(&mut rng, note_len);
        group.throughput(Throughput::Bytes(tx.len() as u64));
        group.bench_with_input(BenchmarkId::new("note_bytes", note_len), &tx, |b, tx| {
            b.iter(|| black_box(service.transaction_digest(tx.as_bytes()).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Assignment and verification
// ============================================================================

fn bench_assign_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-assign-verify");
    group.measurement_time(Duration::from_secs(5));
    let service = TransactionGroupService::new();

    for size in [1usize, 4, 16] {
        let batch = random_batch(size);
        let stamped = service.assign_group(&batch).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("assign", size), &batch, |b, batch| {
            b.iter(|| black_box(service.assign_group(batch).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &stamped, |b, stamped| {
            b.iter(|| black_box(service.verify_group(stamped).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Segmentation
// ============================================================================

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-segmentation");
    group.measurement_time(Duration::from_secs(10));
    let service = TransactionGroupService::new();

    // Block of groups of 4 alternating with ungrouped transactions.
    for groups in [16usize, 64, 200] {
        let mut block = Vec::with_capacity(groups * 5);
        for _ in 0..groups {
            block.extend(service.assign_group(&random_batch(4)).unwrap());
            block.extend(random_batch(1));
        }

        group.throughput(Throughput::Elements(block.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed_block", block.len()), &block, |b, block| {
            b.iter(|| black_box(service.find_and_verify_groups(block).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_transaction_digest,
    bench_assign_and_verify,
    bench_segmentation
);

criterion_main!(benches);
