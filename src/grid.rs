//! Uniform voxel grid used for O(n) neighbor enumeration.
//!
//! Particles are bucketed into cubical voxels of edge length `nbhd_radius`,
//! so that any pair closer than `nbhd_radius` must share a voxel or sit in
//! adjacent ones. Stage A/B only ever visit a voxel's own occupants plus the
//! "forward half" of its neighbor stencil (see `half_neighbor_offsets`),
//! which enumerates every unordered neighboring pair exactly once without a
//! second pass to deduplicate.

use crate::math::FixedVec;
use crate::voxel::Voxel;

/// The half-neighborhood stencil, including the zero offset (self).
///
/// For every pair of opposite offsets `(o, -o)` in the full `3^D`
/// neighborhood, exactly one is kept (the one whose first nonzero component
/// is positive), plus the zero offset itself. That yields `(3^D + 1) / 2`
/// offsets: 2 in 1D, 5 in 2D, 14 in 3D.
pub fn half_neighbor_offsets<const D: usize>() -> Vec<[isize; D]> {
  let total = 3usize.pow(D as u32);
  let mut out = Vec::with_capacity((total + 1) / 2);
  for i in 0..total {
    let mut digits = [0isize; D];
    let mut n = i;
    for d in digits.iter_mut() {
      *d = (n % 3) as isize - 1;
      n /= 3;
    }
    let mut all_zero = true;
    let mut keep = true;
    for &c in digits.iter() {
      if c != 0 {
        all_zero = false;
        keep = c > 0;
        break;
      }
    }
    if all_zero || keep {
      out.push(digits);
    }
  }
  out
}

/// The full `3^D − 1` neighborhood, excluding the zero (self) offset.
///
/// Unlike `half_neighbor_offsets`, this is symmetric: both `o` and `-o` are
/// present. Used by the scheduler's pass/claim marking algorithm, which
/// needs to know every voxel that could conflict with a claimed one, not
/// just the forward half used to enumerate force pairs without double
/// counting.
pub fn full_neighbor_offsets<const D: usize>() -> Vec<[isize; D]> {
  let total = 3usize.pow(D as u32);
  let mut out = Vec::with_capacity(total - 1);
  for i in 0..total {
    let mut digits = [0isize; D];
    let mut n = i;
    for d in digits.iter_mut() {
      *d = (n % 3) as isize - 1;
      n /= 3;
    }
    if digits.iter().any(|&c| c != 0) {
      out.push(digits);
    }
  }
  out
}

/// Uniform spatial grid over `D`-dimensional space.
pub struct Grid<const D: usize> {
  edge_length: f64,
  origin: FixedVec<D>,
  dims: [usize; D],
  voxels: Vec<Voxel>,
  stencil: Vec<[isize; D]>,
  full_stencil: Vec<[isize; D]>,
}

impl<const D: usize> Grid<D> {
  /// Build a grid whose cells are `edge_length` on a side, covering a
  /// bounding box from `origin` out to `origin + extent` (at least one
  /// voxel per axis).
  pub fn new(edge_length: f64, origin: FixedVec<D>, extent: FixedVec<D>) -> Self {
    let mut dims = [1usize; D];
    for d in 0..D {
      let n = (extent[d] / edge_length).ceil() as isize;
      dims[d] = n.max(1) as usize;
    }
    let total: usize = dims.iter().product();
    let voxels = (0..total).map(|_| Voxel::new()).collect();
    Self {
      edge_length,
      origin,
      dims,
      voxels,
      stencil: half_neighbor_offsets::<D>(),
      full_stencil: full_neighbor_offsets::<D>(),
    }
  }

  pub fn voxel_count(&self) -> usize {
    self.voxels.len()
  }

  pub fn dims(&self) -> [usize; D] {
    self.dims
  }

  fn coord_of(&self, p: &FixedVec<D>) -> [usize; D] {
    let mut coord = [0usize; D];
    for d in 0..D {
      let raw = ((p[d] - self.origin[d]) / self.edge_length).floor() as isize;
      coord[d] = raw.clamp(0, self.dims[d] as isize - 1) as usize;
    }
    coord
  }

  fn linear_of(&self, coord: [usize; D]) -> usize {
    let mut idx = 0usize;
    let mut stride = 1usize;
    for d in 0..D {
      idx += coord[d] * stride;
      stride *= self.dims[d];
    }
    idx
  }

  fn coord_of_linear(&self, mut linear: usize) -> [usize; D] {
    let mut coord = [0usize; D];
    for d in 0..D {
      coord[d] = linear % self.dims[d];
      linear /= self.dims[d];
    }
    coord
  }

  pub fn voxel_of(&self, p: &FixedVec<D>) -> usize {
    self.linear_of(self.coord_of(p))
  }

  pub fn voxel(&self, index: usize) -> &Voxel {
    &self.voxels[index]
  }

  pub fn place(&self, particle: usize, position: &FixedVec<D>) -> usize {
    let idx = self.voxel_of(position);
    self.voxels[idx].insert(particle);
    idx
  }

  /// Move `particle` from `old_voxel` to wherever `new_position` maps to,
  /// returning the (possibly unchanged) new voxel index.
  pub fn shift(&self, particle: usize, old_voxel: usize, new_position: &FixedVec<D>) -> usize {
    let new_voxel = self.voxel_of(new_position);
    if new_voxel != old_voxel {
      self.voxels[old_voxel].remove(particle);
      self.voxels[new_voxel].insert(particle);
    }
    new_voxel
  }

  fn apply_stencil(&self, voxel: usize, stencil: &[[isize; D]]) -> Vec<usize> {
    let coord = self.coord_of_linear(voxel);
    let mut out = Vec::with_capacity(stencil.len());
    for offset in stencil {
      let mut neighbor = [0usize; D];
      let mut in_bounds = true;
      for d in 0..D {
        let v = coord[d] as isize + offset[d];
        if v < 0 || v >= self.dims[d] as isize {
          in_bounds = false;
          break;
        }
        neighbor[d] = v as usize;
      }
      if in_bounds {
        out.push(self.linear_of(neighbor));
      }
    }
    out
  }

  /// Linear indices of voxels in the half-neighborhood of `voxel`,
  /// including `voxel` itself, clipped to the grid bounds.
  pub fn half_neighbors(&self, voxel: usize) -> Vec<usize> {
    self.apply_stencil(voxel, &self.stencil)
  }

  /// Linear indices of voxels in the full neighborhood of `voxel`,
  /// excluding `voxel` itself, clipped to the grid bounds.
  pub fn full_neighbors(&self, voxel: usize) -> Vec<usize> {
    self.apply_stencil(voxel, &self.full_stencil)
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
