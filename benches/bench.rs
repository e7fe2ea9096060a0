#![allow(clippy::all)] // Clippy will attempt to remove black_box() internals

use criterion::*;
use ndarray::{Array2, ArrayD, IxDyn};
use wavegrid::diagnostics::NullDiagnostics;
use wavegrid::{interpftn_with, resize_with, revolve_2d_to_3d_with, InterpMode};

/// Smooth test field of the given shape
fn gen_field(shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(shape), |idx| {
        idx.slice()
            .iter()
            .enumerate()
            .map(|(j, &i)| ((i as f64) * 0.1 * (j + 1) as f64).sin())
            .sum()
    })
}

fn bench_resize(c: &mut Criterion) {
    for (ndims, src, dst) in [
        (2, vec![64, 64], vec![128, 96]),
        (3, vec![32, 32, 32], vec![48, 40, 64]),
    ] {
        let mut group = c.benchmark_group(format!("Resize_{ndims}D"));
        let field = gen_field(&src);
        let size: usize = dst.iter().product();
        group.throughput(Throughput::Elements(size as u64));

        for (name, mode) in [
            ("Nearest", InterpMode::Nearest),
            ("Linear", InterpMode::Linear),
            ("Cubic", InterpMode::Cubic),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &dst, |b, dst| {
                b.iter(|| black_box(resize_with(&field, dst, mode, &NullDiagnostics).unwrap()))
            });
        }
        group.finish();
    }
}

fn bench_interpftn(c: &mut Criterion) {
    let mut group = c.benchmark_group("Interpftn");
    for (src, dst) in [
        (vec![64, 64], vec![128, 96]),
        (vec![32, 32, 32], vec![48, 40, 64]),
    ] {
        let field = gen_field(&src);
        let size: usize = dst.iter().product();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(format!("{}D", src.len()), size), &dst, |b, dst| {
            b.iter(|| black_box(interpftn_with(&field, dst, &NullDiagnostics).unwrap()))
        });
    }
    group.finish();
}

fn bench_revolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Revolve");
    for (m, n) in [(16, 32), (64, 64), (128, 96)] {
        let section = Array2::from_shape_fn((m, n), |(i, j)| {
            (i as f64 * 0.05).cos() * (-(j as f64) / n as f64).exp()
        });
        let size = m * (2 * n - 1) * (2 * n - 1);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(format!("{m}x{n}"), size), &section, |b, section| {
            b.iter(|| black_box(revolve_2d_to_3d_with(section, &NullDiagnostics).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches_resize, bench_resize);
criterion_group!(benches_interpftn, bench_interpftn);
criterion_group!(benches_revolve, bench_revolve);
criterion_main!(benches_resize, benches_interpftn, benches_revolve);
