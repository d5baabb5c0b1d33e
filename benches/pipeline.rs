//! Benchmarks for the resolution pipeline.
//!
//! Benchmark targets:
//! - Content hashing: <5µs for a short post
//! - Classification (no translation): <50µs
//! - Verify cache hit: <10µs
//!
//! These benchmarks cover:
//! - Hashing at several text sizes
//! - Lexicon classification
//! - Submit (classify, hash, append, cache write) on an in-memory store
//! - Verify via the cache and via the store

// Criterion macros generate items without docs - this is expected for benchmarks
// Benchmarks use expect/unwrap for simplicity - panics are acceptable in benchmarks
#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use trustscore::classifier::LexiconClassifier;
use trustscore::storage::{MemoryScoreCache, NoopScoreCache, ScoreCache, SqliteTrustStore};
use trustscore::{Classifier, ContentHasher, ResolutionPipeline};

const SAMPLE: &str = "I love this product, the support team was helpful and the delivery was fast. \
                      Not bad at all, although the box arrived a little damaged.";

fn sample_of(len: usize) -> String {
    SAMPLE.chars().cycle().take(len).collect()
}

fn pipeline_with(cache: Arc<dyn ScoreCache>) -> ResolutionPipeline {
    ResolutionPipeline::new(
        Arc::new(SqliteTrustStore::in_memory().expect("in-memory store")),
        cache,
        Arc::new(LexiconClassifier::default()),
    )
}

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    for len in [64_usize, 1_024, 16_384] {
        let text = sample_of(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| ContentHasher::hash(black_box(text)));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let classifier = LexiconClassifier::default();
    let mut group = c.benchmark_group("classify");
    for len in [64_usize, 1_024] {
        let text = sample_of(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| classifier.classify(black_box(text)).unwrap());
        });
    }
    group.finish();
}

fn bench_submit(c: &mut Criterion) {
    let pipeline = pipeline_with(Arc::new(MemoryScoreCache::default()));
    let mut counter = 0_u64;

    c.bench_function("submit", |b| {
        b.iter(|| {
            counter += 1;
            pipeline.submit(&format!("{SAMPLE} #{counter}")).unwrap()
        });
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    let cached = pipeline_with(Arc::new(MemoryScoreCache::default()));
    let hash = cached.submit(SAMPLE).unwrap().content_hash;
    group.bench_function("cache_hit", |b| {
        b.iter(|| cached.verify(black_box(&hash)).unwrap());
    });

    let uncached = pipeline_with(Arc::new(NoopScoreCache));
    let hash = uncached.submit(SAMPLE).unwrap().content_hash;
    group.bench_function("database", |b| {
        b.iter(|| uncached.verify(black_box(&hash)).unwrap());
    });

    group.bench_function("not_found", |b| {
        b.iter(|| uncached.verify(black_box("0x00")).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_hash, bench_classify, bench_submit, bench_verify);
criterion_main!(benches);
