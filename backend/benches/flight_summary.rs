use backend::geo::path_distance_km;
use backend::summary::compute_flight_summary;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shared::GeoPoint;

/// Synthetic zig-zag path of `n` waypoints across a few degrees.
fn synthetic_path(n: usize) -> Vec<GeoPoint> {
    (0..n)
        .map(|i| GeoPoint {
            latitude: 44.0 + (i as f64 * 0.013) % 2.0,
            longitude: 5.0 + (i as f64 * 0.029) % 3.0,
        })
        .collect()
}

fn benchmark_path_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_distance");

    for n in [2usize, 16, 128, 1024, 8192] {
        let path = synthetic_path(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| path_distance_km(black_box(path)));
        });
    }

    group.finish();
}

fn benchmark_flight_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("flight_summary");

    for n in [2usize, 128, 8192] {
        let path = synthetic_path(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &path, |b, path| {
            b.iter(|| compute_flight_summary(black_box(path), black_box(120.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_path_distance, benchmark_flight_summary);
criterion_main!(benches);
