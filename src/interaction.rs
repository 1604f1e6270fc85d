//! Pairwise force laws and the Euler integrator.

use rand::Rng;
use tracing::warn;

use crate::config::SimConfig;
use crate::math::FixedVec;
use crate::particle::Particle;

/// Applies the repulsion and attraction laws and integrates the result.
/// Stateless beyond its config; every method takes the particles it needs
/// directly so it can be shared read-only across worker threads.
pub struct InteractionHandler<const D: usize> {
  config: SimConfig,
}

impl<const D: usize> InteractionHandler<D> {
  pub fn new(config: SimConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &SimConfig {
    &self.config
  }

  /// Displacement between the two particles' raw positions, used for the
  /// proximity/activation gates (unlike the force magnitude itself, these
  /// gates are not stretched by `ellipse_factors`).
  fn raw_delta(&self, p1: &Particle<D>, p2: &Particle<D>) -> FixedVec<D> {
    p1.x() - p2.x()
  }

  /// As `raw_delta`, but with each axis multiplied by its ellipse factor —
  /// the distance actually fed into the Hookean spring law.
  fn scaled_delta(&self, p1: &Particle<D>, p2: &Particle<D>) -> FixedVec<D> {
    let mut delta = p1.x() - p2.x();
    for d in 0..D {
      delta[d] *= self.config.ellipse_factors.factor(d);
    }
    delta
  }

  /// Jitter added to a colliding particle's force accumulator instead of a
  /// diverging spring force: each axis gets a uniformly signed magnitude
  /// scaled by the particle's own collision radius.
  fn add_noise(&self, p: &Particle<D>, rng: &mut impl Rng) {
    if p.is_anchor() {
      return;
    }
    let mut noise = FixedVec::<D>::ZERO;
    let amplitude = p.radius().max(1e-6);
    for d in 0..D {
      let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
      noise[d] = sign * amplitude * rng.random::<f64>();
    }
    p.force.add(&noise);
  }

  /// The shared Hookean spring law about `eq_distance`, using the
  /// ellipse-scaled distance for both magnitude and direction. One
  /// endpoint being an anchor doubles the force on the other, since there
  /// is no reaction force to compensate for; both anchors means no force
  /// at all. The caller has already decided the pair is in range.
  fn apply_spring(&self, p1: &Particle<D>, p2: &Particle<D>, spring_constant: f64, eq_distance: f64) {
    if p1.is_anchor() && p2.is_anchor() {
      return;
    }
    let scaled = self.scaled_delta(p1, p2);
    let dist = scaled.magnitude();
    let Some(dir) = scaled.normalized() else {
      return;
    };
    let magnitude = -spring_constant * (dist - eq_distance) / dist.max(1e-9);
    let mut force = dir.scale(magnitude);
    if p1.is_anchor() || p2.is_anchor() {
      force = force.scale(2.0);
    }
    if !p1.is_anchor() {
      p1.force.add(&force);
    }
    if !p2.is_anchor() {
      p2.force.add(&force.scale(-1.0));
    }
  }

  /// Stage A: short-range interaction between any pair within
  /// `nbhd_radius`, regardless of whether a graph edge connects them.
  /// Colliding pairs (within the sum of their radii) get a random jitter
  /// instead of a force that would otherwise blow up as distance
  /// approaches zero; everyone else gets the spring law pulling them
  /// apart toward `nbhd_radius`.
  pub fn repulse(&self, p1: &Particle<D>, p2: &Particle<D>, rng: &mut impl Rng) {
    if p1.index() == p2.index() {
      return;
    }
    let eq_distance = self.config.nbhd_radius;
    let raw = self.raw_delta(p1, p2);
    if raw.dot(&raw) >= eq_distance * eq_distance {
      return;
    }
    if p1.collides_with(p2) {
      self.add_noise(p1, rng);
      self.add_noise(p2, rng);
      return;
    }
    self.apply_spring(p1, p2, self.config.casual_spring_constant, eq_distance);
  }

  /// Stage B: spring attraction along an active graph edge, applied only
  /// once the endpoints have drifted further apart than `eq_distance` —
  /// Stage A already handles general repulsion at closer range.
  pub fn attract(&self, p1: &Particle<D>, p2: &Particle<D>) {
    let eq_distance = self.config.eq_distance;
    let raw = self.raw_delta(p1, p2);
    if raw.dot(&raw) <= eq_distance * eq_distance {
      return;
    }
    self.apply_spring(p1, p2, self.config.special_spring_constant, eq_distance);
  }

  /// Per-component force cap applied before integration: `0.1 *
  /// nbhd_radius / time_step`, so the limiter scales with both the
  /// spatial and temporal resolution of the simulation.
  pub fn force_limit(&self) -> f64 {
    0.1 * self.config.nbhd_radius / self.config.time_step
  }

  /// Stage C: apply the accumulated, limited force to move one particle,
  /// returning the displacement magnitude. Anchors never move. A NaN force
  /// (a numeric anomaly, not fatal) is logged and discarded rather than
  /// propagated into the position.
  pub fn integrate(&self, particle: &Particle<D>) -> f64 {
    if particle.is_anchor() {
      particle.force.reset();
      return 0.0;
    }
    particle.limit_force(self.force_limit());
    let force = particle.force.load();
    particle.force.reset();

    if force.iter().any(|c| c.is_nan()) {
      warn!(
        index = particle.index(),
        "NaN force component discarded for this iteration"
      );
      return 0.0;
    }

    let displacement = force.scale(self.config.time_step).clamp_components(-0.05, 0.05);
    particle.set_x(particle.x() + displacement);
    displacement.magnitude()
  }
}

#[cfg(test)]
#[path = "interaction_test.rs"]
mod interaction_test;
