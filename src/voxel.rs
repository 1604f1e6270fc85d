//! A single cell of the uniform spatial grid.

use smallvec::SmallVec;
use std::sync::Mutex;

/// Most voxels in a well-spread layout hold a handful of particles; this
/// keeps that common case on the stack.
const INLINE_OCCUPANTS: usize = 8;

/// One cell of the uniform grid: a mutex-guarded set of occupant particle
/// indices, plus a counter of interactions performed against it this
/// iteration (used for progress logging, matching the original's per-voxel
/// bookkeeping).
pub struct Voxel {
  occupants: Mutex<SmallVec<[usize; INLINE_OCCUPANTS]>>,
}

impl Voxel {
  pub fn new() -> Self {
    Self {
      occupants: Mutex::new(SmallVec::new()),
    }
  }

  pub fn insert(&self, particle: usize) {
    let mut occ = self.occupants.lock().unwrap();
    if !occ.contains(&particle) {
      occ.push(particle);
    }
  }

  pub fn remove(&self, particle: usize) {
    let mut occ = self.occupants.lock().unwrap();
    if let Some(pos) = occ.iter().position(|&p| p == particle) {
      occ.swap_remove(pos);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.occupants.lock().unwrap().is_empty()
  }

  pub fn len(&self) -> usize {
    self.occupants.lock().unwrap().len()
  }

  /// Snapshot of the current occupants. Taken once per voxel visit so the
  /// interaction loop doesn't hold the lock across the pair scan.
  pub fn snapshot(&self) -> SmallVec<[usize; INLINE_OCCUPANTS]> {
    self.occupants.lock().unwrap().clone()
  }
}

impl Default for Voxel {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "voxel_test.rs"]
mod voxel_test;
