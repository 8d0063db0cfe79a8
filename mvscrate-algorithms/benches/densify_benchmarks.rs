//! Benchmarks for triangulation angles and voxel simplification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mvscrate_algorithms::{
    estimate_minimum_voxel_size, triangulation_angles_degrees, voxel_downsample,
};
use mvscrate_core::{ColoredPoint3d, ColoredPointCloud3d, Point3d, Vector3d};

fn generate_wave_cloud(size: usize) -> ColoredPointCloud3d {
    let mut points = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * std::f64::consts::PI;
            let fy = y as f64 / (size - 1) as f64 * std::f64::consts::PI;
            points.push(ColoredPoint3d::new(
                Point3d::new(x as f64 * 0.01, y as f64 * 0.01, fx.sin() * fy.sin()),
                Vector3d::new(fx, fy, 0.5),
            ));
        }
    }
    ColoredPointCloud3d::from_points(points)
}

fn bench_triangulation_angles(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulation_angles");
    let c1 = Point3d::new(0.0, 0.0, -5.0);
    let c2 = Point3d::new(0.5, 0.0, -5.0);

    for &size in &[50, 200, 500] {
        let positions = generate_wave_cloud(size).positions();
        group.bench_with_input(BenchmarkId::from_parameter(size * size), &positions, |b, p| {
            b.iter(|| triangulation_angles_degrees(&c1, &c2, black_box(p)))
        });
    }

    group.finish();
}

fn bench_voxel_simplification(c: &mut Criterion) {
    let mut group = c.benchmark_group("voxel_simplification");

    for &size in &[50, 200, 500] {
        let cloud = generate_wave_cloud(size);
        let positions = cloud.positions();

        group.bench_with_input(BenchmarkId::new("estimate", size * size), &positions, |b, p| {
            b.iter(|| estimate_minimum_voxel_size(black_box(p), 0.02))
        });
        group.bench_with_input(BenchmarkId::new("downsample", size * size), &cloud, |b, cloud| {
            b.iter(|| voxel_downsample(black_box(cloud), 0.05))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_triangulation_angles, bench_voxel_simplification);
criterion_main!(benches);
