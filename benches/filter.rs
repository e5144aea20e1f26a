//! Build and query benchmarks for the filter index
//!
//! Run with: cargo bench

use approx_index::index::{FilterIndexBuilder, IndexConfig, QueryLimits};
use approx_index::query::{Pattern, QueryEngine};
use approx_index::utils::{selector_hash, signature_hash};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Pseudo-random DNA-like reference
fn reference(len: usize) -> Vec<u8> {
    let mut state = 0x2545F4914F6CDD1Du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            b"ACGT"[(state & 3) as usize]
        })
        .collect()
}

fn bench_hashes(c: &mut Criterion) {
    let qgram = b"ACGTACGTACGTACGT";
    c.bench_function("selector_hash_16", |b| {
        b.iter(|| selector_hash(black_box(qgram), 1_000_003))
    });
    c.bench_function("signature_hash_16", |b| {
        b.iter(|| signature_hash(black_box(qgram), 1_000_003))
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);
    for size in [10_000usize, 100_000] {
        let text = reference(size);
        group.bench_with_input(BenchmarkId::new("sequential", size), &text, |b, text| {
            b.iter(|| {
                FilterIndexBuilder::new(IndexConfig::new(16).with_parallel_threshold(usize::MAX))
                    .build(black_box(text))
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("sharded", size), &text, |b, text| {
            b.iter(|| {
                FilterIndexBuilder::new(IndexConfig::new(16).with_parallel_threshold(0))
                    .build(black_box(text))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let text = reference(200_000);
    let index = FilterIndexBuilder::new(IndexConfig::new(16))
        .build(&text)
        .unwrap();
    let engine = QueryEngine::new(&index);

    let mut query = text[5_000..5_016].to_vec();
    query[3] = b'N';
    query[11] = b'N';
    let pattern = Pattern::new(query, &QueryLimits::default()).unwrap();

    c.bench_function("query_two_mismatches", |b| {
        b.iter(|| engine.query(black_box(&pattern)).unwrap())
    });
}

criterion_group!(benches, bench_hashes, bench_build, bench_query);
criterion_main!(benches);
