// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//!
//! Benchmark: metadata lookup, property reads and builder construction
//!
//! Cache hits should stay a single map probe; building goes through the
//! generated constructor with one value conversion per field.

#![allow(clippy::uninlined_format_args)]

use beanbridge::{FrameworkAdapter, MetadataCache, Record, RecordMetadata, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Record)]
struct Sample {
    id: u64,
    name: String,
    #[record(alias = "val")]
    value: f64,
    tags: Vec<String>,
    #[record(default)]
    parent: Option<Child>,
}

#[derive(Debug, Clone, PartialEq, Record)]
struct Child {
    depth: u32,
}

fn sample() -> Sample {
    Sample {
        id: 7,
        name: "sensor-7".into(),
        value: 21.5,
        tags: vec!["a".into(), "b".into(), "c".into()],
        parent: Some(Child { depth: 1 }),
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata_cache");

    let cache = MetadataCache::new();
    cache.get::<Sample>();
    group.bench_function("hit", |b| b.iter(|| black_box(cache.get::<Sample>())));

    group.bench_function("compute", |b| {
        b.iter(|| black_box(RecordMetadata::from_shape(<Sample as Record>::shape())))
    });

    group.finish();
}

fn bench_properties(c: &mut Criterion) {
    let mut group = c.benchmark_group("properties");
    let adapter = FrameworkAdapter::new();
    let metadata = adapter.metadata_for::<Sample>();
    let value = sample();

    for name in ["id", "val", "tags"] {
        group.bench_with_input(BenchmarkId::new("read", name), name, |b, name| {
            b.iter(|| {
                let property = metadata.property(name).expect("property");
                black_box(property.read(&value).expect("read"))
            })
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");
    let adapter = FrameworkAdapter::new();
    let metadata: Arc<RecordMetadata> = adapter.metadata_for::<Sample>();
    let source = sample();
    let values: Vec<(&'static str, Value)> = metadata
        .properties()
        .map(|p| (p.name(), p.read(&source).expect("read")))
        .collect();

    group.bench_function("build_all", |b| {
        b.iter(|| {
            let mut builder = adapter.new_builder(&metadata);
            builder.set_all(values.iter().cloned());
            black_box(builder.build_as::<Sample>().expect("build"))
        })
    });

    group.bench_function("build_required_only", |b| {
        b.iter(|| {
            let mut builder = adapter.new_builder(&metadata);
            builder
                .set("id", 1u64)
                .set("name", "n")
                .set("val", 0.0)
                .set("tags", Value::Sequence(Vec::new()));
            black_box(builder.build_as::<Sample>().expect("build"))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_cache, bench_properties, bench_build);
criterion_main!(benches);
