//! Benchmarks the grid coloring scheduler on grids of increasing voxel
//! count, and the half-neighbor stencil it is built from.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layout_sim::grid::Grid;
use layout_sim::math::FixedVec;
use layout_sim::scheduler::GridScheduler;

fn build_grid_2d(voxels_per_edge: usize) -> Grid<2> {
  let extent = FixedVec::<2>::splat(voxels_per_edge as f64);
  Grid::<2>::new(1.0, FixedVec::ZERO, extent)
}

fn build_grid_3d(voxels_per_edge: usize) -> Grid<3> {
  let extent = FixedVec::<3>::splat(voxels_per_edge as f64);
  Grid::<3>::new(1.0, FixedVec::ZERO, extent)
}

fn bench_coloring_2d(c: &mut Criterion) {
  let mut group = c.benchmark_group("scheduler/color/2d");
  for &side in &[8usize, 32, 64] {
    let grid = build_grid_2d(side);
    group.bench_with_input(BenchmarkId::new("voxels", side * side), &side, |b, _| {
      b.iter(|| GridScheduler::build(black_box(&grid)))
    });
  }
  group.finish();
}

fn bench_coloring_3d(c: &mut Criterion) {
  let mut group = c.benchmark_group("scheduler/color/3d");
  for &side in &[8usize, 16, 32] {
    let grid = build_grid_3d(side);
    group.bench_with_input(BenchmarkId::new("voxels", side * side * side), &side, |b, _| {
      b.iter(|| GridScheduler::build(black_box(&grid)))
    });
  }
  group.finish();
}

fn bench_half_neighbors(c: &mut Criterion) {
  let mut group = c.benchmark_group("scheduler/half_neighbors");
  let grid2d = build_grid_2d(64);
  let grid3d = build_grid_3d(32);
  group.bench_function("2d", |b| {
    b.iter(|| {
      for v in 0..grid2d.voxel_count() {
        black_box(grid2d.half_neighbors(black_box(v)));
      }
    })
  });
  group.bench_function("3d", |b| {
    b.iter(|| {
      for v in 0..grid3d.voxel_count() {
        black_box(grid3d.half_neighbors(black_box(v)));
      }
    })
  });
  group.finish();
}

criterion_group!(benches, bench_coloring_2d, bench_coloring_3d, bench_half_neighbors);
criterion_main!(benches);
