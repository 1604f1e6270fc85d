//! Assigns grid voxels to worker threads without data races between
//! spatial neighbors.
//!
//! Two voxels that fall in each other's neighborhood must never be touched
//! by two different workers at the same instant, because both workers would
//! be free to mutate a shared boundary occupant's force accumulator and
//! voxel membership concurrently. The scheduler builds one linear *visit
//! list* `V` by a pass/claim marking algorithm: each pass walks the grid in
//! row-major order, claiming every voxel whose full neighborhood has no
//! conflicting claim from the current pass, and blocking that voxel's
//! neighbors from being claimed for the rest of the pass. Workers then take
//! a strided round-robin slice of `V`, so the whole simulation needs exactly
//! one barrier per stage rather than one per color class.

use crate::grid::Grid;

/// A linearized, race-free visit order over a grid's voxels.
pub struct GridScheduler {
  visit_list: Vec<usize>,
  thread_cap: usize,
}

impl GridScheduler {
  /// Build the visit list for `grid` via pass/claim marking.
  ///
  /// `mark[v] == 0` means unclaimed, `mark[v] == -1` means permanently
  /// claimed (already in `V`), and any other value records the pass `k`
  /// that temporarily blocks `v` from being claimed this pass. Each pass
  /// claims at least one voxel (the first unclaimed, unblocked one in
  /// row-major order always qualifies), so the loop terminates within
  /// `voxel_count` passes at worst.
  pub fn build<const D: usize>(grid: &Grid<D>) -> Self {
    let voxel_count = grid.voxel_count();
    let mut mark = vec![0isize; voxel_count];
    let mut visit_list = Vec::with_capacity(voxel_count);
    let mut k: isize = 1;

    while visit_list.len() < voxel_count {
      for v in 0..voxel_count {
        if mark[v] != 0 {
          continue;
        }
        let neighbors = grid.full_neighbors(v);
        if neighbors.iter().any(|&n| mark[n] == k) {
          continue;
        }
        visit_list.push(v);
        mark[v] = -1;
        for n in neighbors {
          if mark[n] != -1 {
            mark[n] = k;
          }
        }
      }
      for m in mark.iter_mut() {
        if *m != -1 {
          *m = 0;
        }
      }
      k += 1;
    }

    let thread_cap = (grid.dims()[0] / 2).max(1);
    Self { visit_list, thread_cap }
  }

  /// The full visit order, every voxel exactly once.
  pub fn visit_list(&self) -> &[usize] {
    &self.visit_list
  }

  /// This worker's strided share of the visit list: `V[w], V[w+T], ...`.
  pub fn voxel_list_for(&self, worker: usize, thread_count: usize) -> Vec<usize> {
    self.visit_list.iter().copied().skip(worker).step_by(thread_count.max(1)).collect()
  }

  /// Thread count actually usable: capped by `voxels_per_edge[0] / 2` to
  /// preserve the coloring property on small grids, with a floor of 1.
  pub fn effective_thread_count(&self, requested: usize) -> usize {
    requested.min(self.thread_cap).max(1)
  }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;
