//! Benchmarks for the Redb raw store.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use typedstore_storage::{RawCursor, RawStore, RedbStore, StoreOptions, SyncPolicy};

fn bench_store() -> RedbStore {
    let options = StoreOptions::new().background_compaction(None);
    RedbStore::in_memory_with_options(options).unwrap()
}

/// Benchmark single key-value writes under each sync policy.
fn bench_put_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("redb_put_single");
    group.throughput(Throughput::Elements(1));

    for (name, policy) in [
        ("every_write", SyncPolicy::EveryWrite),
        ("disabled", SyncPolicy::Disabled),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let options =
                        StoreOptions::new().background_sync(policy).background_compaction(None);
                    RedbStore::in_memory_with_options(options).unwrap()
                },
                |store| store.put(b"key", b"value").unwrap(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Benchmark single key reads.
fn bench_get_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("redb_get_single");
    group.throughput(Throughput::Elements(1));

    let store = bench_store();
    store.put(b"key", b"value").unwrap();

    group.bench_function("get_single", |b| {
        b.iter(|| black_box(store.get(black_box(b"key")).unwrap()));
    });

    group.finish();
}

/// Benchmark full cursor scans.
fn bench_cursor_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("redb_cursor_scan");

    for size in [100u32, 1000, 10_000] {
        let store = bench_store();
        for i in 0..size {
            store.put(&i.to_be_bytes(), format!("value:{i:05}").as_bytes()).unwrap();
        }

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_function(format!("scan_{size}"), |b| {
            b.iter(|| {
                let mut cursor = store.cursor().unwrap();
                let mut count = 0;
                while let Some(entry) = cursor.next().unwrap() {
                    black_box(entry);
                    count += 1;
                }
                count
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put_single, bench_get_single, bench_cursor_scan);
criterion_main!(benches);
