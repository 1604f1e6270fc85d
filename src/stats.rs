//! Per-iteration convergence statistics.

use std::sync::Mutex;

/// Accumulates `Σ|x_u−x_v|` and edge count across a Stage D fan-out, so
/// workers can merge partial sums into one `dx` for the iteration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeLengthStats {
  pub total_length: f64,
  pub edge_count: usize,
}

impl EdgeLengthStats {
  pub fn record(&mut self, length: f64) {
    self.total_length += length;
    self.edge_count += 1;
  }

  pub fn merge(&mut self, other: &EdgeLengthStats) {
    self.total_length += other.total_length;
    self.edge_count += other.edge_count;
  }

  pub fn average(&self) -> f64 {
    if self.edge_count == 0 {
      0.0
    } else {
      self.total_length / self.edge_count as f64
    }
  }
}

/// Shared sink workers merge their local `EdgeLengthStats` into during
/// Stage D, once per iteration.
#[derive(Default)]
pub struct StatsAccumulator(Mutex<EdgeLengthStats>);

impl StatsAccumulator {
  pub fn new() -> Self {
    Self(Mutex::new(EdgeLengthStats::default()))
  }

  pub fn merge_local(&self, local: &EdgeLengthStats) {
    self.0.lock().unwrap().merge(local);
  }

  pub fn take(&self) -> EdgeLengthStats {
    std::mem::take(&mut self.0.lock().unwrap())
  }
}

/// Tracks the `dx_prev`/`avg_prev` history the relative-change convergence
/// test (§4.4 Stage D) compares each iteration's `dx` against. `dx` is the
/// average layout-graph edge length over the edges touching the
/// just-activated level; the first two iterations of a layer never
/// converge since there is no history to compare against yet.
#[derive(Default)]
pub struct ConvergenceTracker {
  dx_prev: Option<f64>,
  avg_prev: Option<f64>,
}

impl ConvergenceTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Folds in this iteration's `dx`, returns whether the run has
  /// converged, and advances the history for next time.
  pub fn step(&mut self, dx: f64, iteration: u32, cutoff_precision: f64) -> bool {
    let mut converged = iteration > 150;

    if let Some(dx_prev) = self.dx_prev {
      if dx.abs() > 1e-12 && (dx - dx_prev).abs() / dx < cutoff_precision {
        converged = true;
      }
      let avg = (dx_prev + dx) / 2.0;
      if let Some(avg_prev) = self.avg_prev {
        if avg.abs() > 1e-12 && (avg - avg_prev).abs() / avg < 0.1 * cutoff_precision {
          converged = true;
        }
      }
      self.avg_prev = Some(avg);
    }
    self.dx_prev = Some(dx);

    converged
  }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
