mod common;

use std::sync::Arc;

use batch_hasher::{Coordinator, HashPrimitive, Pbkdf2Sha1};
use common::generate_common_passwords;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const PASSWORD_COUNT: usize = 256;

// Share of the input that repeats an earlier password.
const DUPLICATE_PERCENT: u32 = 10;

// Lower than the default so a full sweep finishes in reasonable time.
const BENCH_ITERATIONS: u32 = 1_000;

fn make_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread().enable_all().build().unwrap()
}

fn bench_single_hash(c: &mut Criterion) {
    let primitive = Pbkdf2Sha1::default();

    c.bench_function("pbkdf2_sha1_default", |b| {
        b.iter(|| black_box(primitive.hash(black_box("password123"), b"salt").unwrap()))
    });
}

/// Same input hashed with an increasing number of batches.
fn bench_concurrency(c: &mut Criterion) {
    let runtime = make_runtime();
    let passwords = generate_common_passwords(PASSWORD_COUNT, DUPLICATE_PERCENT);
    let primitive = Arc::new(Pbkdf2Sha1::new(BENCH_ITERATIONS, 256).unwrap());

    let mut group = c.benchmark_group("generate_all_hashes");
    group.sample_size(10);

    for degree in [1, 2, 4, 8, 16] {
        let coordinator = Coordinator::new(Arc::clone(&primitive), "salt", degree);
        group.bench_with_input(BenchmarkId::from_parameter(degree), &degree, |b, _| {
            b.to_async(&runtime).iter(|| async {
                black_box(coordinator.generate_all_hashes(&passwords).await.unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_hash, bench_concurrency);
criterion_main!(benches);
