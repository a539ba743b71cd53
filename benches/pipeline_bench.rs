// ABOUTME: Criterion benchmarks for the recommendation pipeline hot paths
// ABOUTME: Measures completion extraction, profile fingerprinting and cache operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the recommendation pipeline.
//!
//! Covers the work done on every request that does not involve the
//! completion service: validation, fingerprinting, cache access, and
//! extraction of completions of increasing noise.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nutriplan_server::cache::memory::InMemoryCache;
use nutriplan_server::cache::{CacheConfig, RecommendationCache};
use nutriplan_server::models::{ProfileSubmission, RecommendationRecord};
use nutriplan_server::recommendations::{
    extractor::extract, fingerprint, validator::normalize, Fingerprint,
};
use tokio::runtime::Runtime;

const PAYLOAD: &str = r#"{"breakfast": [{"name": "Poha", "quantity": "1 plate", "calories": 250}],
 "lunch": [{"name": "Rajma Chawal", "calories": 480}], "dinner": ["Palak Paneer", "Roti"],
 "yoga": [{"name": "Tadasana", "duration": "5 min"}],
 "workouts": [{"name": "Brisk Walk", "duration": "30 min", "calories_burned": 150}]}"#;

/// Completion noise surrounding the payload
#[derive(Debug, Clone, Copy)]
enum Wrapping {
    Bare,
    Fenced,
    NoisyPrefix,
}

impl Wrapping {
    const fn name(self) -> &'static str {
        match self {
            Self::Bare => "bare",
            Self::Fenced => "fenced",
            Self::NoisyPrefix => "noisy_prefix",
        }
    }

    fn render(self) -> String {
        match self {
            Self::Bare => PAYLOAD.to_owned(),
            Self::Fenced => format!("Here is your plan:\n```json\n{PAYLOAD}\n```\nEnjoy!"),
            Self::NoisyPrefix => {
                let noise = "Try {a little} of {everything}. ".repeat(50);
                format!("{noise}{PAYLOAD}")
            }
        }
    }
}

fn submission() -> ProfileSubmission {
    ProfileSubmission::from_fields([
        ("age", "34"),
        ("gender", "female"),
        ("weight", "64.5"),
        ("height", "1.65"),
        ("veg_or_nonveg", "vegetarian"),
        ("disease", "none"),
        ("region", "Gujarat"),
        ("allergies", "none"),
        ("foodtype", "Indian"),
    ])
}

fn make_key(index: usize) -> Fingerprint {
    Fingerprint::from_hex(format!("{index:064x}"))
}

/// Benchmark extraction across completion shapes
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for wrapping in [Wrapping::Bare, Wrapping::Fenced, Wrapping::NoisyPrefix] {
        let text = wrapping.render();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(wrapping.name()),
            &text,
            |b, text| {
                b.iter(|| extract(black_box(text)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark validation plus fingerprinting of a submission
fn bench_fingerprint(c: &mut Criterion) {
    let submission = submission();
    let profile = normalize(&submission).unwrap();

    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(&submission)).unwrap());
    });
    c.bench_function("fingerprint", |b| {
        b.iter(|| fingerprint(black_box(&profile)).unwrap());
    });
}

/// Benchmark cache puts at capacity (every put evicts) and cache hits
fn bench_cache(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("cache");
    let record = extract(PAYLOAD).unwrap();

    group.bench_function("put_evicting", |b| {
        let cache = InMemoryCache::new(&CacheConfig::default());
        rt.block_on(async {
            for i in 0..cache.capacity() {
                cache.put(make_key(i), RecommendationRecord::empty()).await;
            }
        });

        let mut key_index = cache.capacity();
        b.iter(|| {
            let key = make_key(key_index);
            key_index = key_index.wrapping_add(1);
            rt.block_on(async { cache.put(black_box(key), record.clone()).await })
        });
    });

    group.bench_function("get_hit", |b| {
        let cache = InMemoryCache::new(&CacheConfig::default());
        rt.block_on(async {
            for i in 0..cache.capacity() {
                cache.put(make_key(i), record.clone()).await;
            }
        });

        let mut key_index = 0_usize;
        b.iter(|| {
            let key = make_key(key_index % cache.capacity());
            key_index = key_index.wrapping_add(1);
            rt.block_on(async { cache.get(black_box(&key)).await })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_extract, bench_fingerprint, bench_cache);
criterion_main!(benches);
