//! Initial position assignment: anchors, random seeding, and interpolation.

use rand::Rng;
use tracing::warn;

use crate::graph::Graph;
use crate::math::{point_on_sphere, FixedVec};
use crate::particle::ParticleContainer;

/// Bounding radius for random initial placement when none is configured:
/// `n^(1/D)`, so the initial cloud's volume scales with vertex count.
pub fn default_outer_radius(vertex_count: usize, dimension: usize) -> f64 {
  (vertex_count.max(1) as f64).powf(1.0 / dimension as f64)
}

/// Scatter every not-yet-initialized, non-anchor particle onto a sphere of
/// `outer_radius` around the origin.
pub fn seed_random_positions<const D: usize>(
  container: &mut ParticleContainer<D>,
  outer_radius: f64,
  rng: &mut impl Rng,
) {
  for i in 0..container.len() {
    let p = container.get(i);
    if p.is_position_initialized() || p.is_anchor() {
      continue;
    }
    let pos = point_on_sphere(rng, FixedVec::ZERO, outer_radius);
    container.get(i).set_x(pos);
  }
}

/// Anchors are loaded after initial seeding and override whatever position
/// (random or otherwise) a particle already had, regardless of prior value.
pub fn apply_anchors<const D: usize>(
  container: &mut ParticleContainer<D>,
  anchors: impl IntoIterator<Item = (usize, FixedVec<D>)>,
) {
  for (index, position) in anchors {
    container.get(index).set_x(position);
    container.get_mut(index).mark_anchor();
  }
}

/// Load caller-supplied initial positions, distinct from anchors: these
/// vertices still move during simulation, they just start somewhere
/// specific rather than wherever random seeding or interpolation would
/// otherwise put them. Applied after anchors (which always win) and before
/// random seeding, so random seeding only ever touches genuinely unset
/// vertices.
pub fn apply_initial_positions<const D: usize>(
  container: &mut ParticleContainer<D>,
  init_positions: impl IntoIterator<Item = (usize, FixedVec<D>)>,
) {
  for (index, position) in init_positions {
    let particle = container.get(index);
    if particle.is_anchor() {
      continue;
    }
    particle.set_x(position);
  }
}

/// Repeatedly set each uninitialized, non-anchor, eligible particle to the
/// mean position of its already-initialized neighbors, until no particle
/// changes in a full pass (or the graph genuinely has no path from any
/// initialized vertex, in which case the pass limit below stops the loop).
/// `eligible` restricts which vertices are considered at all — used to keep
/// a layer's interpolation from reaching ahead into vertices that haven't
/// been activated yet.
pub fn interpolate_unset_positions<const D: usize>(
  container: &mut ParticleContainer<D>,
  graph: &Graph,
  eligible: &[bool],
) {
  let max_passes = container.len().max(1);
  for _ in 0..max_passes {
    let mut changed = false;
    for v in 0..container.len() {
      if !eligible[v] {
        continue;
      }
      let particle = container.get(v);
      if particle.is_position_initialized() || particle.is_anchor() {
        continue;
      }
      let mut sum = FixedVec::<D>::ZERO;
      let mut count = 0usize;
      for &(u, _) in graph.neighbors(v) {
        let neighbor = container.get(u);
        if neighbor.is_position_initialized() {
          sum += neighbor.x();
          count += 1;
        }
      }
      if count > 0 {
        container.get(v).set_x(sum.scale(1.0 / count as f64));
        changed = true;
      }
    }
    if !changed {
      return;
    }
  }
  let still_unset = (0..container.len())
    .filter(|&v| eligible[v] && !container.get(v).is_position_initialized())
    .count();
  if still_unset > 0 {
    warn!(
      still_unset,
      "position interpolation left vertices unset after exhausting its pass budget \
      (isolated from every initialized vertex)"
    );
  }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod init_test;
