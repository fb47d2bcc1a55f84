use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use poll_types::Phase;
use poll_work::{validate_work, CancelToken, WorkContext, WorkGenerator, WorkNonce};

fn bench_pow_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("pow_generation");
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let ctx = WorkContext::new("benchns", Phase::Primary, "c_bench");

    // Low difficulties that complete quickly enough for benchmarking.
    // Each extra bit doubles the expected search length.
    for bits in [0u32, 4, 8, 12] {
        group.bench_with_input(BenchmarkId::new("generate", bits), &bits, |b, &bits| {
            let generator = WorkGenerator::new(bits);
            b.iter(|| {
                rt.block_on(generator.generate(black_box(&ctx), &CancelToken::new()))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_pow_validation(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let ctx = WorkContext::new("benchns", Phase::Primary, "c_bench");
    let generator = WorkGenerator::new(10);
    let nonce = rt
        .block_on(generator.generate(&ctx, &CancelToken::new()))
        .unwrap();

    c.bench_function("pow_validate_valid", |b| {
        b.iter(|| black_box(validate_work(black_box(&ctx), black_box(nonce), 10)));
    });

    c.bench_function("pow_validate_invalid", |b| {
        b.iter(|| black_box(validate_work(black_box(&ctx), WorkNonce(u64::MAX), 10)));
    });
}

criterion_group!(benches, bench_pow_generation, bench_pow_validation);
criterion_main!(benches);
