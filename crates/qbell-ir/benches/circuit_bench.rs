//! Benchmarks for qbell circuit construction
//!
//! Run with: cargo bench -p qbell-ir

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qbell_ir::Circuit;
use std::f64::consts::PI;

fn bench_template(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotated_bell");

    group.bench_function("with_measurement", |b| {
        b.iter(|| Circuit::rotated_bell(black_box(PI / 4.0), black_box(true)).unwrap());
    });

    group.bench_function("without_measurement", |b| {
        b.iter(|| Circuit::rotated_bell(black_box(PI / 4.0), black_box(false)).unwrap());
    });

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let circuit = Circuit::rotated_bell(PI / 4.0, true).unwrap();
    c.bench_function("depth", |b| {
        b.iter(|| black_box(&circuit).depth());
    });
}

criterion_group!(benches, bench_template, bench_depth);
criterion_main!(benches);
