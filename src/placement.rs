//! Seeding positions for a layer's newly activated vertices.

use rand::Rng;

use crate::config::SimConfig;
use crate::math::{point_on_sphere, point_on_unit_sphere, FixedVec};

/// How far from the parent a new batch of children is scattered.
///
/// Uses the configured distance if one was given; otherwise derives it from
/// the batch size and dimension so that dense batches spread out further:
/// `min(0.25*sqrt(n), 10)` in 2D, `min(0.25*n^0.34, 10)` otherwise.
pub fn placement_distance(child_count: usize, dimension: usize, configured: Option<f64>) -> f64 {
  if let Some(d) = configured {
    return d;
  }
  let n = child_count.max(1) as f64;
  let raw = if dimension == 2 {
    0.25 * n.sqrt()
  } else {
    0.25 * n.powf(0.34)
  };
  raw.min(10.0)
}

/// Centroid of a set of (position, mass) pairs, weighted by mass; the zero
/// vector if empty or if every mass is non-positive.
pub fn center_of_mass<const D: usize>(weighted: &[(FixedVec<D>, f64)]) -> FixedVec<D> {
  let mut sum = FixedVec::ZERO;
  let mut mass_sum = 0.0;
  for &(p, m) in weighted {
    sum += p.scale(m);
    mass_sum += m;
  }
  if mass_sum <= 0.0 {
    return FixedVec::ZERO;
  }
  sum.scale(1.0 / mass_sum)
}

/// Direction a parent should push its new children away from the graph
/// already laid out: the average of two unit vectors pointing away from the
/// center of mass of the rest of the already-placed vertices, and away from
/// the parent's own parent (the "grandparent" of the children being
/// placed). Either term drops out when its direction is undefined (parent
/// sits exactly at the center of mass, or there is no grandparent / the
/// parent sits exactly at the grandparent's position); falls back to a
/// random direction only when both terms are degenerate.
pub fn expansion_direction<const D: usize>(
  parent_pos: FixedVec<D>,
  rest_of_graph_com: FixedVec<D>,
  grandparent_pos: Option<FixedVec<D>>,
  rng: &mut impl Rng,
) -> FixedVec<D> {
  let from_com = (parent_pos - rest_of_graph_com).normalized();
  let from_grandparent = grandparent_pos.and_then(|gp| (parent_pos - gp).normalized());

  let combined = match (from_com, from_grandparent) {
    (Some(a), Some(b)) => Some((a + b).scale(0.5)),
    (Some(a), None) => Some(a),
    (None, Some(b)) => Some(b),
    (None, None) => None,
  };

  combined
    .and_then(|d| d.normalized())
    .unwrap_or_else(|| point_on_unit_sphere(rng))
}

/// Scatter `children` onto a sphere seeded out from `parent_pos` along
/// `direction`. When `place_leafs_close` is set and every child in this
/// batch is itself a leaf, the batch collapses onto the parent's own
/// position instead of stepping further out.
pub fn place_children<const D: usize>(
  parent_pos: FixedVec<D>,
  direction: FixedVec<D>,
  children: &[usize],
  all_leaves: bool,
  config: &SimConfig,
  rng: &mut impl Rng,
) -> Vec<(usize, FixedVec<D>)> {
  let center = if config.place_leafs_close && all_leaves {
    parent_pos
  } else {
    let dist = placement_distance(children.len(), D, config.placement_distance);
    parent_pos + direction.scale(dist)
  };
  children
    .iter()
    .map(|&c| (c, point_on_sphere(rng, center, config.placement_radius)))
    .collect()
}

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;
