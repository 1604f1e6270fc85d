//! In-progress layout snapshots, handed to a caller-supplied callback.

use crate::math::FixedVec;
use crate::particle::ParticleContainer;

/// A point-in-time copy of every particle's position.
///
/// `sequence` is a run-wide monotonic counter rather than `(layer,
/// iteration)`, since iteration counts reset at the start of every layer
/// and would otherwise collide as a snapshot key.
#[derive(Clone, Debug)]
pub struct Snapshot<const D: usize> {
  pub sequence: u64,
  pub layer: usize,
  pub iteration: u32,
  pub positions: Vec<FixedVec<D>>,
}

/// Emits a `Snapshot` every `write_interval` iterations, or never if it is
/// zero.
pub struct SnapshotEmitter {
  write_interval: u32,
  next_sequence: u64,
}

impl SnapshotEmitter {
  pub fn new(write_interval: u32) -> Self {
    Self {
      write_interval,
      next_sequence: 0,
    }
  }

  pub fn maybe_emit<const D: usize>(
    &mut self,
    layer: usize,
    iteration: u32,
    container: &ParticleContainer<D>,
    mut callback: impl FnMut(Snapshot<D>),
  ) {
    if self.write_interval == 0 || iteration % self.write_interval != 0 {
      return;
    }
    let positions = container.iter().map(|p| p.x()).collect();
    let snapshot = Snapshot {
      sequence: self.next_sequence,
      layer,
      iteration,
      positions,
    };
    self.next_sequence += 1;
    callback(snapshot);
  }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
