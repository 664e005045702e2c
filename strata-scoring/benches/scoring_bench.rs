use criterion::{criterion_group, criterion_main, Criterion};

use strata_scoring::{ScoringContext, ScoringEngine};
use test_fixtures::{fixed_now, RecordBuilder};

fn build_records(n: usize) -> Vec<strata_core::record::Record> {
    (0..n)
        .map(|i| {
            RecordBuilder::new(format!("r{i}"))
                .created_days_ago((i % 365) as i64)
                .accessed_days_ago((i % 30) as i64)
                .access_count((i % 50) as u64)
                .importance((i % 101) as u8)
                .connections((i % 12) as u64)
                .build()
        })
        .collect()
}

fn bench_single_score(c: &mut Criterion) {
    let engine = ScoringEngine::new();
    let record = build_records(1).remove(0);
    let ctx = ScoringContext::at(fixed_now());

    c.bench_function("score_single_record", |b| {
        b.iter(|| engine.score_with_context(&record, &ctx));
    });
}

fn bench_batch_10k(c: &mut Criterion) {
    let engine = ScoringEngine::new();
    let records = build_records(10_000);
    let ctx = ScoringContext::at(fixed_now());

    c.bench_function("score_batch_10k", |b| {
        b.iter(|| engine.score_batch(&records, &ctx));
    });
}

criterion_group!(benches, bench_single_score, bench_batch_10k);
criterion_main!(benches);
