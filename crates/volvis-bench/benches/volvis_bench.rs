//! Benchmarks for volvis sampling.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use volvis_math::CubicKernel;
use volvis_volume::{parallel, Dims, GradientField, InterpolationMode, ScalarField, Vec3};

/// Smooth synthetic volume: a radial falloff with some ripple.
fn test_field(n: usize) -> ScalarField {
    let dims = Dims::new(n, n, n);
    let center = (n as f32 - 1.0) * 0.5;
    let mut samples = Vec::with_capacity(dims.len());
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let p = Vec3::new(x as f32, y as f32, z as f32) - Vec3::splat(center);
                let r = p.length() / center;
                let v = (1.0 - r).max(0.0) * (0.75 + 0.25 * (r * 12.0).cos());
                samples.push((v * 4095.0) as u16);
            }
        }
    }
    ScalarField::new(samples, dims).expect("valid test field")
}

/// Deterministic positions spread across the interior.
fn test_coords(n: usize, count: usize) -> Vec<Vec3> {
    let extent = n as f32 - 1.0;
    (0..count)
        .map(|i| {
            let f = i as f32;
            Vec3::new(
                (f * 0.618_034).fract() * extent,
                (f * 0.414_214).fract() * extent,
                (f * 0.732_051).fract() * extent,
            )
        })
        .collect()
}

/// Benchmark scalar queries per interpolation mode.
fn bench_scalar_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_sample");

    let field = test_field(64);
    let coords = test_coords(64, 10_000);
    group.throughput(Throughput::Elements(coords.len() as u64));

    for mode in InterpolationMode::ALL {
        group.bench_with_input(BenchmarkId::new("serial", mode), &coords, |b, coords| {
            b.iter(|| {
                coords
                    .iter()
                    .map(|&p| field.sample_with(black_box(p), mode))
                    .sum::<f32>()
            })
        });
    }

    group.bench_with_input(BenchmarkId::new("batch", "linear"), &coords, |b, coords| {
        b.iter(|| parallel::sample_batch(&field, black_box(coords), InterpolationMode::Linear))
    });

    group.finish();
}

/// Benchmark gradient reconstruction.
fn bench_gradient_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient_sample");

    let gradients = GradientField::from_scalar(&test_field(64));
    let coords = test_coords(64, 10_000);
    group.throughput(Throughput::Elements(coords.len() as u64));

    for mode in [InterpolationMode::NearestNeighbor, InterpolationMode::Linear] {
        group.bench_with_input(BenchmarkId::new("serial", mode), &coords, |b, coords| {
            b.iter(|| {
                coords
                    .iter()
                    .map(|&p| gradients.gradient_with(black_box(p), mode).magnitude)
                    .sum::<f32>()
            })
        });
    }

    group.finish();
}

/// Benchmark central-difference construction.
fn bench_gradient_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient_build");
    group.sample_size(20);

    for n in [32, 64, 128] {
        let field = test_field(n);
        group.throughput(Throughput::Elements(field.dims().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &field, |b, field| {
            b.iter(|| GradientField::from_scalar(black_box(field)))
        });
    }

    group.finish();
}

/// Benchmark kernel weight evaluation.
fn bench_cubic_kernel(c: &mut Criterion) {
    let kernel = CubicKernel::default();
    let ts: Vec<f32> = (0..1000).map(|i| i as f32 / 1000.0).collect();

    c.bench_function("cubic_weights", |b| {
        b.iter(|| {
            ts.iter()
                .map(|&t| kernel.weights(black_box(t))[1])
                .sum::<f32>()
        })
    });
}

criterion_group!(
    benches,
    bench_scalar_sample,
    bench_gradient_sample,
    bench_gradient_build,
    bench_cubic_kernel,
);
criterion_main!(benches);
