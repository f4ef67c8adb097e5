//! # Layered Filter Benchmarks
//!
//! Performance claims to validate:
//! - test / test_and_set: one hash plus O(L) bit lookups
//! - export_delta: one layer allocation plus one layer copy
//! - import_layer: one layer copy plus a population count

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use delta_bloom::{LayeredFilter, RngEntropy};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn make_filter(size_exponent: u32) -> LayeredFilter {
    LayeredFilter::new(
        RngEntropy::new(StdRng::seed_from_u64(7)),
        size_exponent,
        0.03125,
    )
    .expect("valid filter")
}

fn generate_entries(count: usize) -> Vec<[u8; 32]> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..count)
        .map(|_| {
            let mut entry = [0u8; 32];
            rng.fill_bytes(&mut entry);
            entry
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta-bloom/insert");
    group.measurement_time(Duration::from_secs(5));

    let entries = generate_entries(1000);
    group.throughput(Throughput::Elements(entries.len() as u64));
    group.bench_function("test_and_set_1000", |b| {
        b.iter(|| {
            let mut filter = make_filter(15);
            for entry in &entries {
                black_box(filter.test_and_set(black_box(entry)));
            }
            black_box(filter.entries())
        });
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta-bloom/lookup");
    group.measurement_time(Duration::from_secs(5));

    // Lookups scan every retained layer, so vary the layer count
    let entries = generate_entries(100);
    for layers in [1usize, 4, 8] {
        let mut filter = make_filter(20);
        for _ in 1..layers {
            for entry in &entries {
                filter.test_and_set(entry);
            }
            filter.export_delta();
        }
        let absent = generate_entries(1)[0];

        group.bench_with_input(BenchmarkId::new("test_absent", layers), &layers, |b, _| {
            b.iter(|| black_box(filter.test(black_box(&absent))));
        });
    }

    group.finish();
}

fn bench_layer_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("delta-bloom/exchange");
    group.measurement_time(Duration::from_secs(5));

    for size_exponent in [15u32, 20] {
        let layer_bytes = (1usize << size_exponent) / 8;
        group.throughput(Throughput::Bytes(layer_bytes as u64));

        group.bench_with_input(
            BenchmarkId::new("export_delta", size_exponent),
            &size_exponent,
            |b, &size_exponent| {
                b.iter(|| {
                    let mut filter = make_filter(size_exponent);
                    black_box(filter.export_delta())
                });
            },
        );

        let mut layer = vec![0u8; layer_bytes];
        StdRng::seed_from_u64(3).fill_bytes(&mut layer[..layer_bytes / 64]);
        group.bench_with_input(
            BenchmarkId::new("import_layer", size_exponent),
            &size_exponent,
            |b, &size_exponent| {
                b.iter(|| {
                    let mut filter = make_filter(size_exponent);
                    black_box(filter.import_layer(black_box(&layer)))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_layer_exchange);
criterion_main!(benches);
