//! Small statically-sized numeric vectors used throughout the simulation.
//!
//! `FixedVec<D>` stands in for the handful of fixed-size linear-algebra
//! operations the engine actually needs (distance, magnitude, scale,
//! translate, dot product) without pulling in a general-purpose linear
//! algebra crate tuned for 3-only or 4-only vector types: the engine runs in
//! 1, 2, or 3 dimensions, chosen once per run, so `D` is a `const` generic
//! rather than a fixed `Vec2`/`Vec3` split.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};

/// A `D`-dimensional point or displacement of `f64` components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedVec<const D: usize>(pub [f64; D]);

impl<const D: usize> FixedVec<D> {
  pub const ZERO: FixedVec<D> = FixedVec([0.0; D]);

  pub fn splat(v: f64) -> Self {
    FixedVec([v; D])
  }

  pub fn from_array(a: [f64; D]) -> Self {
    FixedVec(a)
  }

  pub fn iter(&self) -> impl Iterator<Item = &f64> {
    self.0.iter()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
    self.0.iter_mut()
  }

  /// True when every component is exactly zero.
  ///
  /// This is the proxy the original engine uses for "position not yet
  /// initialized" (see `Particle::is_position_initialized`). It is a
  /// deliberate, documented simplification: a legitimate node placed
  /// exactly at the origin is indistinguishable from an unset one.
  pub fn is_all_zero(&self) -> bool {
    self.0.iter().all(|&c| c == 0.0)
  }

  pub fn dot(&self, other: &Self) -> f64 {
    self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
  }

  pub fn distance_squared(&self, other: &Self) -> f64 {
    self.0
      .iter()
      .zip(other.0.iter())
      .map(|(a, b)| (a - b) * (a - b))
      .sum()
  }

  pub fn distance(&self, other: &Self) -> f64 {
    self.distance_squared(other).sqrt()
  }

  pub fn magnitude(&self) -> f64 {
    self.dot(self).sqrt()
  }

  /// Unit vector in the direction of `self`, or `None` if `self` is (close
  /// to) the zero vector. Zero-magnitude direction is a documented
  /// "clamp, don't crash" case (see the engine's Numeric error policy):
  /// callers fall back to whichever secondary direction they have.
  pub fn normalized(&self) -> Option<Self> {
    let mag = self.magnitude();
    if mag <= f64::EPSILON {
      None
    } else {
      let mut out = *self;
      for c in out.iter_mut() {
        *c /= mag;
      }
      Some(out)
    }
  }

  pub fn scale(&self, s: f64) -> Self {
    let mut out = *self;
    for c in out.iter_mut() {
      *c *= s;
    }
    out
  }

  /// Per-component clamp, used by the integrator's per-step displacement
  /// cap and the interaction handler's force limiter.
  pub fn clamp_components(&self, lo: f64, hi: f64) -> Self {
    let mut out = *self;
    for c in out.iter_mut() {
      *c = c.clamp(lo, hi);
    }
    out
  }
}

impl<const D: usize> Default for FixedVec<D> {
  fn default() -> Self {
    Self::ZERO
  }
}

impl<const D: usize> Index<usize> for FixedVec<D> {
  type Output = f64;
  fn index(&self, i: usize) -> &f64 {
    &self.0[i]
  }
}

impl<const D: usize> IndexMut<usize> for FixedVec<D> {
  fn index_mut(&mut self, i: usize) -> &mut f64 {
    &mut self.0[i]
  }
}

impl<const D: usize> Add for FixedVec<D> {
  type Output = Self;
  fn add(self, rhs: Self) -> Self {
    let mut out = self;
    for i in 0..D {
      out.0[i] += rhs.0[i];
    }
    out
  }
}

impl<const D: usize> AddAssign for FixedVec<D> {
  fn add_assign(&mut self, rhs: Self) {
    for i in 0..D {
      self.0[i] += rhs.0[i];
    }
  }
}

impl<const D: usize> Sub for FixedVec<D> {
  type Output = Self;
  fn sub(self, rhs: Self) -> Self {
    let mut out = self;
    for i in 0..D {
      out.0[i] -= rhs.0[i];
    }
    out
  }
}

impl<const D: usize> Mul<f64> for FixedVec<D> {
  type Output = Self;
  fn mul(self, rhs: f64) -> Self {
    self.scale(rhs)
  }
}

/// Uniform random point on the unit sphere in `D` dimensions (§4.10).
///
/// Only 2D and 3D are meaningful for a layout; `D = 1` degenerates to `+-1`
/// and is handled as a special case so the engine still runs in 1D for
/// testing/degenerate graphs.
pub fn point_on_unit_sphere<const D: usize>(rng: &mut impl rand::Rng) -> FixedVec<D> {
  match D {
    1 => {
      let mut v = FixedVec::<D>::ZERO;
      v.0[0] = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
      v
    }
    2 => {
      let theta = rng.random_range(0.0..std::f64::consts::TAU);
      let mut v = FixedVec::<D>::ZERO;
      v.0[0] = theta.cos();
      v.0[1] = theta.sin();
      v
    }
    _ => {
      let theta = rng.random_range(0.0..std::f64::consts::TAU);
      let u: f64 = rng.random_range(0.0..1.0);
      let phi = (1.0 - 2.0 * u).acos();
      let mut v = FixedVec::<D>::ZERO;
      v.0[0] = theta.cos() * phi.sin();
      v.0[1] = theta.sin() * phi.sin();
      v.0[2] = phi.cos();
      v
    }
  }
}

/// A point on a sphere of the given `radius` centered at `center`.
pub fn point_on_sphere<const D: usize>(
  rng: &mut impl rand::Rng,
  center: FixedVec<D>,
  radius: f64,
) -> FixedVec<D> {
  center + point_on_unit_sphere::<D>(rng).scale(radius)
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
