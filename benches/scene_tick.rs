//! Benchmarks for the per-tick scene loop and frame composition.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use moonlattice::{Lattice, Scene};

fn build_scene(cones: usize) -> Scene {
    Scene::builder()
        .with_seed(42)
        .with_cones(cones)
        .with_hexes(cones / 16)
        .build()
        .expect("default scene config is valid")
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");

    for &count in &[50usize, 500, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut scene = build_scene(count);
            b.iter(|| black_box(scene.tick(black_box(1.0 / 60.0))))
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_frame");

    for &count in &[50usize, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let scene = build_scene(count);
            b.iter(|| black_box(scene.frame()))
        });
    }

    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let lattice = Lattice::default();
    c.bench_function("lattice_contains", |b| {
        b.iter(|| black_box(lattice.contains(black_box(40.0), black_box(30.0), black_box(-20.0))))
    });
}

criterion_group!(benches, bench_tick, bench_frame, bench_envelope);
criterion_main!(benches);
