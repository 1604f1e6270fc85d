//! A node's simulation state, and the container that owns all of them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::math::FixedVec;

/// Sentinel meaning "not currently placed in any voxel".
pub const NO_CONTAINER: usize = usize::MAX;

/// A single `f64` that supports lock-free `fetch_add`.
///
/// Rust's standard library does not expose atomic floats (unlike C++20's
/// `std::atomic<double>`), so this follows the bit-pattern compare-exchange
/// approach the spec calls out as the portable fallback: additions are only
/// required to be visible before the next Stage A/B -> C barrier, which the
/// CAS loop trivially satisfies.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
  pub fn new(v: f64) -> Self {
    Self(AtomicU64::new(v.to_bits()))
  }

  pub fn load(&self, order: Ordering) -> f64 {
    f64::from_bits(self.0.load(order))
  }

  pub fn store(&self, v: f64, order: Ordering) {
    self.0.store(v.to_bits(), order);
  }

  pub fn fetch_add(&self, delta: f64, order: Ordering) -> f64 {
    let mut current = self.0.load(Ordering::Relaxed);
    loop {
      let new = f64::from_bits(current) + delta;
      match self
        .0
        .compare_exchange_weak(current, new.to_bits(), order, Ordering::Relaxed)
      {
        Ok(prev) => return f64::from_bits(prev),
        Err(actual) => current = actual,
      }
    }
  }
}

impl Default for AtomicF64 {
  fn default() -> Self {
    Self::new(0.0)
  }
}

/// A `D`-dimensional vector of lock-free atomic components: the force
/// accumulator. Stage A and Stage B add into this commutatively from many
/// workers at once; Stage C reads and resets it, after the barrier that
/// separates accumulation from integration.
#[derive(Debug)]
pub struct AtomicVec<const D: usize>([AtomicF64; D]);

impl<const D: usize> AtomicVec<D> {
  pub fn zero() -> Self {
    Self(std::array::from_fn(|_| AtomicF64::new(0.0)))
  }

  pub fn add(&self, v: &FixedVec<D>) {
    for i in 0..D {
      self.0[i].fetch_add(v[i], Ordering::AcqRel);
    }
  }

  pub fn load(&self) -> FixedVec<D> {
    let mut out = FixedVec::<D>::ZERO;
    for i in 0..D {
      out[i] = self.0[i].load(Ordering::Acquire);
    }
    out
  }

  pub fn store(&self, v: &FixedVec<D>) {
    for i in 0..D {
      self.0[i].store(v[i], Ordering::Release);
    }
  }

  pub fn reset(&self) {
    self.store(&FixedVec::ZERO);
  }
}

/// A node's simulation state.
///
/// Both `pos` and `force` are atomic: `force` is added into from many
/// workers within a stage, and `pos` is written by exactly one worker per
/// iteration (during Stage C) but that worker varies iteration to
/// iteration, so plain interior mutability without `&mut self` is the
/// simplest way to let the thread pool dispatch by shared reference.
pub struct Particle<const D: usize> {
  index: usize,
  id: String,
  pos: AtomicVec<D>,
  pub force: AtomicVec<D>,
  radius: f64,
  mass: f64,
  anchor: bool,
  /// Index of the voxel this particle currently occupies, or
  /// `NO_CONTAINER`. Only ever written by the shift call for this
  /// particle, which always runs on the particle's owning worker; atomic
  /// so the Stage C dispatch closure only needs a shared reference.
  container: std::sync::atomic::AtomicUsize,
  /// Guards read-modify-write access to `force` during the force limiter,
  /// matching the original engine's explicit particle-level lock even
  /// though, by construction, only the owning worker ever touches it
  /// within a stage.
  limiter_lock: Mutex<()>,
}

impl<const D: usize> Particle<D> {
  pub fn new(index: usize, id: impl Into<String>) -> Self {
    Self {
      index,
      id: id.into(),
      pos: AtomicVec::zero(),
      force: AtomicVec::zero(),
      radius: 0.0,
      mass: 1.0,
      anchor: false,
      container: std::sync::atomic::AtomicUsize::new(NO_CONTAINER),
      limiter_lock: Mutex::new(()),
    }
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn x(&self) -> FixedVec<D> {
    self.pos.load()
  }

  pub fn set_x(&self, v: FixedVec<D>) {
    self.pos.store(&v);
  }

  pub fn id(&self) -> &str {
    &self.id
  }

  pub fn radius(&self) -> f64 {
    self.radius
  }

  pub fn set_radius(&mut self, r: f64) {
    self.radius = r;
  }

  pub fn mass(&self) -> f64 {
    self.mass
  }

  pub fn set_mass(&mut self, m: f64) {
    self.mass = m;
  }

  pub fn is_anchor(&self) -> bool {
    self.anchor
  }

  /// Marks this particle as an anchor. Anchors are never repositioned by
  /// integration or placement for the rest of the run.
  pub fn mark_anchor(&mut self) {
    self.anchor = true;
  }

  pub fn container(&self) -> Option<usize> {
    let c = self.container.load(Ordering::Acquire);
    (c != NO_CONTAINER).then_some(c)
  }

  pub fn set_container(&self, c: Option<usize>) {
    self.container
      .store(c.unwrap_or(NO_CONTAINER), Ordering::Release);
  }

  /// Proxy for "has an initial position been set": all coordinates being
  /// exactly zero is treated as unset. See the math module docs and
  /// DESIGN.md for why this simplification was kept.
  pub fn is_position_initialized(&self) -> bool {
    !self.x().is_all_zero()
  }

  pub fn collides_with(&self, other: &Particle<D>) -> bool {
    self.x().distance_squared(&other.x()) <= (self.radius + other.radius).powi(2)
  }

  /// Clamp each force component to `[-limit, limit]`, guarded by this
  /// particle's own lock (a read-modify-write of the whole vector).
  pub fn limit_force(&self, limit: f64) {
    let _guard = self.limiter_lock.lock().unwrap();
    let clamped = self.force.load().clamp_components(-limit, limit);
    self.force.store(&clamped);
  }
}

/// Ordered collection of particles, indexed by the same vertex descriptor
/// space as the graph. The sole owner of `Particle` values; voxels hold only
/// indices into this container.
pub struct ParticleContainer<const D: usize> {
  particles: Vec<Particle<D>>,
}

impl<const D: usize> ParticleContainer<D> {
  pub fn with_ids(ids: impl IntoIterator<Item = String>) -> Self {
    let particles = ids
      .into_iter()
      .enumerate()
      .map(|(i, id)| Particle::new(i, id))
      .collect();
    Self { particles }
  }

  pub fn len(&self) -> usize {
    self.particles.len()
  }

  pub fn is_empty(&self) -> bool {
    self.particles.is_empty()
  }

  pub fn get(&self, i: usize) -> &Particle<D> {
    &self.particles[i]
  }

  pub fn get_mut(&mut self, i: usize) -> &mut Particle<D> {
    &mut self.particles[i]
  }

  pub fn iter(&self) -> impl Iterator<Item = &Particle<D>> {
    self.particles.iter()
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle<D>> {
    self.particles.iter_mut()
  }

  /// Remove particles at the given indices, compacting the container and
  /// returning the new index each surviving particle was assigned (in
  /// ascending original-index order). Used when `disregard_disconnected`
  /// drops particles whose component was never initialized.
  pub fn remove_indices(&mut self, mut drop: Vec<usize>) {
    drop.sort_unstable();
    drop.dedup();
    let mut next = 0;
    self.particles.retain(|_| {
      let keep = drop.binary_search(&next).is_err();
      next += 1;
      keep
    });
    for (new_index, p) in self.particles.iter_mut().enumerate() {
      p.index = new_index;
    }
  }
}

#[cfg(test)]
#[path = "particle_test.rs"]
mod particle_test;
