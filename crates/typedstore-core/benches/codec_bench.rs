//! Benchmarks for the built-in codecs.

#![allow(missing_docs)]

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde::{Deserialize, Serialize};

use typedstore_core::{BincodeCodec, Codec, Float64Codec, StringCodec, Uint64Codec};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Document {
    id: u64,
    title: String,
    tags: Vec<String>,
    scores: BTreeMap<String, f64>,
}

fn document() -> Document {
    Document {
        id: 42,
        title: "bench document".into(),
        tags: (0..8).map(|i| format!("tag-{i}")).collect(),
        scores: (0..8).map(|i| (format!("score-{i}"), f64::from(i) * 0.5)).collect(),
    }
}

/// Benchmark fixed-width numeric codecs.
fn bench_numeric(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_numeric");
    group.throughput(Throughput::Elements(1));

    group.bench_function("uint64_encode", |b| {
        b.iter(|| Uint64Codec.encode(black_box(&0xDEAD_BEEF_u64)).unwrap());
    });

    let encoded = Uint64Codec.encode(&0xDEAD_BEEF_u64).unwrap();
    group.bench_function("uint64_decode", |b| {
        b.iter(|| Uint64Codec.decode(black_box(&encoded)).unwrap());
    });

    group.bench_function("float64_encode", |b| {
        b.iter(|| Float64Codec.encode(black_box(&1.5_f64)).unwrap());
    });

    group.finish();
}

/// Benchmark string codec at several sizes.
fn bench_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_string");

    for size in [16usize, 256, 4096] {
        let input = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("string_roundtrip_{size}"), |b| {
            b.iter(|| {
                let bytes = StringCodec.encode(black_box(&input)).unwrap();
                StringCodec.decode(&bytes).unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark the serde fallback codec on a structured value.
fn bench_fallback(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_fallback");
    group.throughput(Throughput::Elements(1));

    let codec = BincodeCodec::<Document>::new();
    let doc = document();
    let encoded = codec.encode(&doc).unwrap();

    group.bench_function("document_encode", |b| {
        b.iter(|| codec.encode(black_box(&doc)).unwrap());
    });
    group.bench_function("document_decode", |b| {
        b.iter(|| codec.decode(black_box(&encoded)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_numeric, bench_string, bench_fallback);
criterion_main!(benches);
