//! End-to-end benchmarks of a full layout run, on synthetic graphs chosen
//! to exercise both the guiding-tree construction and the multi-level
//! simulation pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layout_sim::{Graph, SimConfig, SimulationDriver};

fn chain_graph(n: usize) -> Graph {
  let mut g = Graph::new(n);
  for i in 0..n - 1 {
    g.add_edge(i, i + 1, 1.0);
  }
  g
}

fn star_graph(n: usize) -> Graph {
  let mut g = Graph::new(n);
  for i in 1..n {
    g.add_edge(0, i, 1.0);
  }
  g
}

fn grid_graph(side: usize) -> Graph {
  let mut g = Graph::new(side * side);
  for r in 0..side {
    for c in 0..side {
      let v = r * side + c;
      if c + 1 < side {
        g.add_edge(v, v + 1, 1.0);
      }
      if r + 1 < side {
        g.add_edge(v, v + side, 1.0);
      }
    }
  }
  g
}

fn bench_chain(c: &mut Criterion) {
  let mut group = c.benchmark_group("driver/chain");
  for &n in &[32usize, 128, 512] {
    let g = chain_graph(n);
    let config = SimConfig::default().with_thread_count(4).with_max_iterations(50);
    let driver: SimulationDriver<2> = SimulationDriver::new(config).unwrap();
    group.bench_with_input(BenchmarkId::new("nodes", n), &n, |b, _| {
      b.iter(|| black_box(driver.run(black_box(&g), [], [], |_| {}).unwrap()))
    });
  }
  group.finish();
}

fn bench_star(c: &mut Criterion) {
  let mut group = c.benchmark_group("driver/star");
  for &n in &[32usize, 128, 512] {
    let g = star_graph(n);
    let config = SimConfig::default().with_thread_count(4).with_max_iterations(50);
    let driver: SimulationDriver<2> = SimulationDriver::new(config).unwrap();
    group.bench_with_input(BenchmarkId::new("nodes", n), &n, |b, _| {
      b.iter(|| black_box(driver.run(black_box(&g), [], [], |_| {}).unwrap()))
    });
  }
  group.finish();
}

fn bench_grid_3d(c: &mut Criterion) {
  let mut group = c.benchmark_group("driver/grid/3d");
  for &side in &[4usize, 8, 16] {
    let g = grid_graph(side);
    let config = SimConfig::default().with_thread_count(4).with_max_iterations(50);
    let driver: SimulationDriver<3> = SimulationDriver::new(config).unwrap();
    group.bench_with_input(BenchmarkId::new("side", side), &side, |b, _| {
      b.iter(|| black_box(driver.run(black_box(&g), [], [], |_| {}).unwrap()))
    });
  }
  group.finish();
}

criterion_group!(benches, bench_chain, bench_star, bench_grid_3d);
criterion_main!(benches);
